//! Route definitions for the mock service API.

pub mod extract;
pub mod health;
pub mod mocks;
pub mod mockservice;

use axum::{
    http::Method,
    routing::{any, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full router: probes, management API, and the mock catch-all.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]);

    let mock_root = format!("/v1{}", state.config.mock_route_prefix);
    let mock_catch_all = format!("{mock_root}/{{*path}}");

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route(
            "/v1/mock",
            post(mocks::create)
                .put(mocks::edit)
                .delete(mocks::delete)
                .patch(mocks::enable),
        )
        .route("/v1/mock/filters", get(mocks::filters))
        .route("/v1/mocks", get(mocks::list_by_filter))
        .route(&mock_root, any(mockservice::serve))
        .route(&mock_catch_all, any(mockservice::serve))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
