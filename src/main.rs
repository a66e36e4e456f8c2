use std::net::SocketAddr;

use anyhow::Context;
use mimalloc::MiMalloc;
use mockservice::config::AppConfig;
use mockservice::{load_pdf, routes, store, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mockservice=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let pdf = load_pdf(config.mock_pdf_path.as_deref()).context("Failed to load PDF resource")?;
    let store = store::open(&config).await?;

    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid BACKEND_HOST '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(
        host = %addr,
        backend = ?config.store_backend,
        prefix = %config.mock_route_prefix,
        "Starting mock service"
    );

    let app = routes::router(AppState::new(store, config, pdf));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutting down");
}
