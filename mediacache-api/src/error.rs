//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use mediacache_core::{MediaError, NOT_FOUND_MESSAGE};

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<MediaError> for ApiError {
    /// A miss stays a 404 no matter where it was raised; everything else is
    /// a 500 carrying the underlying message.
    fn from(err: MediaError) -> Self {
        if err.is_not_found() {
            return ApiError::not_found(NOT_FOUND_MESSAGE);
        }

        tracing::error!(error = %err, "Failed to serve media");
        ApiError::internal(err.to_string())
    }
}

impl From<axum::http::Error> for ApiError {
    fn from(err: axum::http::Error) -> Self {
        tracing::error!(error = %err, "Failed to build response");
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_stays_not_found() {
        let err = ApiError::from(MediaError::NotFound("passwd".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "File not found");

        let err = ApiError::from(MediaError::Io(io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_errors_are_internal_with_message() {
        let err = ApiError::from(MediaError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("permission denied"));

        let err = ApiError::from(MediaError::Internal("header build failed".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("header build failed"));
    }
}
