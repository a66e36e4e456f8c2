//! Catch-all route answering client traffic with the active mock.

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::models::mock::MockResponse;
use crate::services::resolution;
use crate::AppState;

/// ANY /v1{prefix}/{*path} — serve whatever is active for the request's endpoint.
pub async fn serve(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    let resolved = resolution::resolve(
        state.store.as_ref(),
        &state.config.mock_route_prefix,
        uri.path(),
        method.as_str(),
    )
    .await?;

    let status = StatusCode::from_u16(resolved.status())
        .map_err(|e| AppError::Internal(format!("Invalid status code: {e}")))?;

    let response = match resolved {
        MockResponse::Pdf { .. } => (
            status,
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"mock.pdf\""),
            ],
            state.pdf.clone(),
        )
            .into_response(),
        MockResponse::Json { body, .. } => (status, Json(body)).into_response(),
        MockResponse::StatusOnly { .. } => status.into_response(),
    };

    Ok(response)
}
