//! API Response types
//!
//! - `Envelope<T>`: `{ "data": ... }` wrapper for every success body
//! - `ErrorBody`: `{ "message": ... }` for every failure
//! - `ok` / `created` / `no_content` helpers for handlers

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Success envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Dish must include a name")]
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handler result: status + enveloped data, or an `ApiError`
pub type ApiResult<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

/// 200 with `{ data }`
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(Envelope::new(data))))
}

/// 201 with `{ data }`
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(Envelope::new(data))))
}

/// 204, empty body
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
