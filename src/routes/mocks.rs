//! Mock management routes: create, edit, delete, enable, and listings.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::mock::{
    CreateMock, EditMock, FilterNameQuery, FilterSummary, Mock, MockIdQuery, MockView,
};
use crate::routes::extract::{ApiJson, ApiQuery};
use crate::services::{activation, listing};
use crate::AppState;

/// POST /v1/mock — register a mock and make it active for its endpoint.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateMock>,
) -> Result<Json<ApiResponse<Mock>>, AppError> {
    let mock = activation::create(state.store.as_ref(), &body).await?;
    Ok(ApiResponse::success(mock))
}

/// PUT /v1/mock — overwrite a mock and make it active.
pub async fn edit(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EditMock>,
) -> Result<Json<ApiResponse<Mock>>, AppError> {
    let mock = activation::edit(state.store.as_ref(), &body).await?;
    Ok(ApiResponse::success(mock))
}

/// DELETE /v1/mock?id= — remove a mock.
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MockIdQuery>,
) -> Result<Json<ApiResponse<Mock>>, AppError> {
    let mock = activation::delete(state.store.as_ref(), query.id).await?;
    Ok(ApiResponse::success(mock))
}

/// PATCH /v1/mock?id= — make an existing mock the active one.
pub async fn enable(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MockIdQuery>,
) -> Result<Json<ApiResponse<Mock>>, AppError> {
    let mock = activation::enable(state.store.as_ref(), query.id).await?;
    Ok(ApiResponse::success(mock))
}

/// GET /v1/mock/filters — filter groups with counts, newest first.
pub async fn filters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FilterSummary>>>, AppError> {
    let summary = listing::filters(state.store.as_ref()).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /v1/mocks?name= — all mocks in a filter group.
pub async fn list_by_filter(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FilterNameQuery>,
) -> Result<Json<ApiResponse<Vec<MockView>>>, AppError> {
    let mocks = listing::by_filter(
        state.store.as_ref(),
        &query.name,
        &state.config.domain_mock_path,
    )
    .await?;
    Ok(ApiResponse::success(mocks))
}
