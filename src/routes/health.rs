//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks mock store connectivity.
pub async fn ready(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            ApiResponse::success(HealthStatus {
                status: "ok".to_string(),
                store: "connected".to_string(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Mock store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiResponse::success(HealthStatus {
                    status: "degraded".to_string(),
                    store: format!("error: {e}"),
                }),
            )
        }
    }
}
