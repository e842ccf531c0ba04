//! HTTP error mapping for domain and validation failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use colab_core::CoreError;
use tracing::error;

use crate::models::ErrorResponse;

/// Error returned by API handlers
///
/// Carries the HTTP status plus the `{ "error": ..., "code": ... }` body
/// the client surfaces directly.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: Option<String>,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            code: Some("BAD_REQUEST".to_string()),
        }
    }

    pub fn unauthorized(error: impl Into<String>, code: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: error.into(),
            code: Some(code.to_string()),
        }
    }

    pub fn forbidden(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: error.into(),
            code: Some("FORBIDDEN".to_string()),
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: error.into(),
            code: Some("NOT_FOUND".to_string()),
        }
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            code: Some("INTERNAL".to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => ApiError::not_found(msg),
            CoreError::Forbidden(msg) => ApiError::forbidden(msg),
            CoreError::Conflict(msg) => ApiError::bad_request(msg),
            CoreError::CapacityExceeded(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                error: msg,
                code: Some("CAPACITY_EXCEEDED".to_string()),
            },
            CoreError::Database(e) => {
                error!("Database error: {e}");
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        error!("Database error: {err}");
        ApiError::internal("Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.error,
            code: self.code,
        });

        (self.status, body).into_response()
    }
}
