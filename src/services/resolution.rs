//! Resolution engine: match an inbound request to the active mock for its endpoint.

use crate::errors::AppError;
use crate::models::mock::{HttpMethod, Mock, MockResponse};
use crate::services::path::{normalize, strip_route_prefix};
use crate::store::MockStore;

/// Resolve a raw request path and method token to a response descriptor.
///
/// Unknown method tokens fail before the store is consulted.
pub async fn resolve(
    store: &dyn MockStore,
    route_prefix: &str,
    raw_path: &str,
    method: &str,
) -> Result<MockResponse, AppError> {
    let path = normalize(&strip_route_prefix(raw_path, route_prefix));
    let method: HttpMethod = method.parse()?;

    let mock = store
        .find_active_by_path_and_method(&path, method)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No active mock for {method} {path}")))?;

    tracing::debug!(id = %mock.id, path = %path, %method, "Resolved mock");
    response_for(&mock)
}

/// PDF beats body, body beats status-only.
///
/// Only final statuses (200-599) can be served; 1xx is never a valid answer.
pub fn response_for(mock: &Mock) -> Result<MockResponse, AppError> {
    let status = u16::try_from(mock.status_code)
        .ok()
        .filter(|s| (200..=599).contains(s))
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Mock '{}' has invalid status code {}",
                mock.id, mock.status_code
            ))
        })?;

    if mock.is_pdf {
        return Ok(MockResponse::Pdf { status });
    }

    match &mock.body {
        Some(body) => Ok(MockResponse::Json {
            status,
            body: body.clone(),
        }),
        None => Ok(MockResponse::StatusOnly { status }),
    }
}
