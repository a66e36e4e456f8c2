//! Seed script for development — registers a handful of sample mocks.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). Mocks go through the activation
//! engine, so re-running the script simply makes the newest copy active.

use mockservice::config::AppConfig;
use mockservice::models::mock::{CreateMock, HttpMethod};
use mockservice::services::activation;
use mockservice::store::{self, MockStore};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let store = store::open(&config).await?;

    println!("=== Mock Service Seed Script ===");

    seed_users(store.as_ref()).await?;
    seed_billing(store.as_ref()).await?;

    println!("\n=== Seed complete! ===");
    println!(
        "Try: curl -i http://{}:{}/v1{}/v1/users",
        config.host, config.port, config.mock_route_prefix
    );

    Ok(())
}

fn sample(
    filter_name: &str,
    description: &str,
    path: &str,
    method: HttpMethod,
    status_code: u16,
    body: Option<serde_json::Value>,
) -> CreateMock {
    CreateMock {
        filter_name: filter_name.to_string(),
        description: description.to_string(),
        path: path.to_string(),
        method,
        status_code,
        body,
        is_pdf: false,
    }
}

async fn seed_users(store: &dyn MockStore) -> anyhow::Result<()> {
    let mocks = [
        sample(
            "users",
            "User list",
            "/v1/users",
            HttpMethod::Get,
            200,
            Some(json!([
                {"id": 1, "name": "Ada"},
                {"id": 2, "name": "Grace"}
            ])),
        ),
        sample(
            "users",
            "Create user",
            "/v1/users",
            HttpMethod::Post,
            201,
            Some(json!({"id": 3})),
        ),
        sample(
            "users",
            "Delete user, no content",
            "/v1/users/1",
            HttpMethod::Delete,
            204,
            None,
        ),
    ];

    for mock in &mocks {
        let created = activation::create(store, mock).await?;
        println!("[done] {} {} -> {}", created.method, created.path, created.status_code);
    }
    Ok(())
}

async fn seed_billing(store: &dyn MockStore) -> anyhow::Result<()> {
    let mut invoice = sample(
        "billing",
        "Invoice document",
        "/v1/invoices/42/pdf",
        HttpMethod::Get,
        200,
        None,
    );
    invoice.is_pdf = true;

    let outage = sample(
        "billing",
        "Invoice service outage",
        "/v1/invoices",
        HttpMethod::Get,
        503,
        Some(json!({"error": "temporarily unavailable"})),
    );

    for mock in [invoice, outage] {
        let created = activation::create(store, &mock).await?;
        println!("[done] {} {} -> {}", created.method, created.path, created.status_code);
    }
    Ok(())
}
