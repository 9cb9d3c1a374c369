//! Common error types and handling for Cinedex

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Cinedex application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to clients.
    ///
    /// Server-side failures keep their detail in the logs only.
    fn public_message(&self) -> String {
        match self {
            Error::Validation(_) | Error::NotFound(_) => self.to_string(),
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Log internal errors with full context
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
