//! Request extractors whose rejections answer with the API error envelope.

use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    Json,
};

use crate::errors::AppError;

/// JSON body; malformed or mistyped payloads become `400 VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string; missing or unparseable parameters become `400 VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
