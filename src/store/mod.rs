//! Mock persistence: the `MockStore` contract and its backends.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::errors::AppError;
use crate::models::mock::{HttpMethod, Mock, MockFields};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMockStore;
pub use postgres::PgMockStore;

/// Durable collection of mock records.
///
/// Each call is atomic on its own; nothing here spans several calls.
/// Backend failures are logged with the operation name and returned as
/// internal errors.
#[async_trait]
pub trait MockStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Mock>, AppError>;

    async fn find_by_filter_name(&self, filter_name: &str) -> Result<Vec<Mock>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError>;

    /// The active mock for an endpoint. If several are active, the one with
    /// the newest `create_date` wins, then the lowest id.
    async fn find_active_by_path_and_method(
        &self,
        path: &str,
        method: HttpMethod,
    ) -> Result<Option<Mock>, AppError>;

    /// Fails with `Conflict` when the id is taken.
    async fn insert(&self, mock: &Mock) -> Result<(), AppError>;

    /// Overwrite everything but `id` and `filter_name`. `None` if the id is unknown.
    async fn replace(&self, id: Uuid, fields: &MockFields) -> Result<Option<Mock>, AppError>;

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<Mock>, AppError>;

    /// Returns how many records were touched.
    async fn set_active_for_all(
        &self,
        path: &str,
        method: HttpMethod,
        active: bool,
    ) -> Result<u64, AppError>;

    /// Returns the removed record, `None` if nothing matched.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Open the backend selected by configuration. Postgres connects with retry and migrates.
pub async fn open(config: &AppConfig) -> anyhow::Result<Arc<dyn MockStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory mock store; mocks are lost on restart");
            Ok(Arc::new(InMemoryMockStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required for the postgres store")
            })?;
            let pool = db::connect_with_retry(
                url,
                config.database_max_connections,
                config.database_connect_retries,
            )
            .await?;
            db::migrate(&pool).await?;
            Ok(Arc::new(PgMockStore::new(pool)))
        }
    }
}
