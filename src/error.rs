//! API Error Types
//!
//! Every guard failure and every service failure is an [`ApiError`]. The
//! gateway turns it into `{ "message": ... }` with the carried status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::types::ErrorBody;
use crate::repository::RepositoryError;

/// API error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Payload or record state rejected by a guard
    #[error("{0}")]
    Validation(String),

    /// Route id does not resolve to a record
    #[error("{0}")]
    NotFound(String),

    /// Storage conflict or poisoned lock
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    /// Get the error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(id) => ApiError::NotFound(format!("Record not found: {id}")),
            RepositoryError::DuplicateId(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        assert_eq!(
            ApiError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(ApiError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(ApiError::internal("x").code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_display_is_bare_message() {
        let err = ApiError::not_found("Dish does not exist: abc");
        assert_eq!(err.to_string(), "Dish does not exist: abc");
    }

    #[test]
    fn test_from_repository_error() {
        assert_eq!(
            ApiError::from(RepositoryError::DuplicateId("a".into())),
            ApiError::internal("Duplicate id: a")
        );
        assert!(matches!(
            ApiError::from(RepositoryError::NotFound("a".into())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_into_response_status() {
        let resp = ApiError::validation("Dish must include a name").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
