//! Database connection pool and migration utilities.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Delay before reconnect attempt `attempt` (1-based): 2, 4, 8, 16 seconds, then 10.
pub fn retry_delay(attempt: u32) -> Duration {
    if attempt > 4 {
        Duration::from_secs(10)
    } else {
        Duration::from_secs(2u64.pow(attempt))
    }
}

/// Keep trying to open the pool until it succeeds or `max_attempts` is used up.
///
/// `max_attempts == 0` retries forever.
pub async fn connect_with_retry(
    database_url: &str,
    max_connections: u32,
    max_attempts: u32,
) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match create_pool(database_url, max_connections).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) if max_attempts != 0 && attempt >= max_attempts => {
                tracing::error!(attempt, error = %e, "Giving up on database connection");
                return Err(e);
            }
            Err(e) => {
                let delay = retry_delay(attempt);
                tracing::error!(
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    error = %e,
                    "Database connection failed"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Apply the embedded schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
