//! Error types for the HTTP surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdex_common::Error;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Pipeline error
    #[error(transparent)]
    Catalog(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Catalog(err) => match err {
                Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                Error::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_ERROR"),
                Error::ImageDownload(_) => (StatusCode::BAD_GATEWAY, "IMAGE_DOWNLOAD_ERROR"),
                Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
                Error::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RECORD_ERROR"),
                Error::Config(_) | Error::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
