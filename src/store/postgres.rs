//! PostgreSQL-backed mock store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::mock::{HttpMethod, Mock, MockFields};
use crate::store::MockStore;

#[derive(Debug, Clone)]
pub struct PgMockStore {
    pool: PgPool,
}

impl PgMockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Log a query failure with its operation and hand it back as a store error.
fn store_failure(operation: &'static str, e: sqlx::Error) -> AppError {
    tracing::error!(operation, error = %e, "Mock store query failed");
    AppError::Database(e)
}

#[async_trait]
impl MockStore for PgMockStore {
    async fn find_all(&self) -> Result<Vec<Mock>, AppError> {
        sqlx::query_as::<_, Mock>("SELECT * FROM mocks ORDER BY create_date DESC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_failure("find_all", e))
    }

    async fn find_by_filter_name(&self, filter_name: &str) -> Result<Vec<Mock>, AppError> {
        sqlx::query_as::<_, Mock>(
            "SELECT * FROM mocks WHERE filter_name = $1 ORDER BY create_date DESC, id ASC",
        )
        .bind(filter_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_failure("find_by_filter_name", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError> {
        sqlx::query_as::<_, Mock>("SELECT * FROM mocks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("find_by_id", e))
    }

    async fn find_active_by_path_and_method(
        &self,
        path: &str,
        method: HttpMethod,
    ) -> Result<Option<Mock>, AppError> {
        sqlx::query_as::<_, Mock>(
            r#"
            SELECT * FROM mocks
            WHERE is_active AND path = $1 AND method = $2
            ORDER BY create_date DESC, id ASC
            LIMIT 1
            "#,
        )
        .bind(path)
        .bind(method)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_failure("find_active_by_path_and_method", e))
    }

    async fn insert(&self, mock: &Mock) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO mocks (id, filter_name, description, path, method, status_code,
                body, is_pdf, is_active, create_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(mock.id)
        .bind(&mock.filter_name)
        .bind(&mock.description)
        .bind(&mock.path)
        .bind(mock.method)
        .bind(mock.status_code)
        .bind(&mock.body)
        .bind(mock.is_pdf)
        .bind(mock.is_active)
        .bind(mock.create_date)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("Mock with id '{}' already exists", mock.id))
            }
            _ => store_failure("insert", e),
        })?;

        Ok(())
    }

    async fn replace(&self, id: Uuid, fields: &MockFields) -> Result<Option<Mock>, AppError> {
        sqlx::query_as::<_, Mock>(
            r#"
            UPDATE mocks SET
                description = $2,
                path = $3,
                method = $4,
                status_code = $5,
                body = $6,
                is_pdf = $7,
                is_active = $8,
                create_date = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.description)
        .bind(&fields.path)
        .bind(fields.method)
        .bind(fields.status_code)
        .bind(&fields.body)
        .bind(fields.is_pdf)
        .bind(fields.is_active)
        .bind(fields.create_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_failure("replace", e))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<Option<Mock>, AppError> {
        sqlx::query_as::<_, Mock>("UPDATE mocks SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("set_active", e))
    }

    async fn set_active_for_all(
        &self,
        path: &str,
        method: HttpMethod,
        active: bool,
    ) -> Result<u64, AppError> {
        let result =
            sqlx::query("UPDATE mocks SET is_active = $3 WHERE path = $1 AND method = $2")
                .bind(path)
                .bind(method)
                .bind(active)
                .execute(&self.pool)
                .await
                .map_err(|e| store_failure("set_active_for_all", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Mock>, AppError> {
        sqlx::query_as::<_, Mock>("DELETE FROM mocks WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("delete_by_id", e))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| store_failure("ping", e))?;
        Ok(())
    }
}
