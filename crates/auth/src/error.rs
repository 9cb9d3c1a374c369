//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cinedex_common::ValidatedJsonRejection;
use serde_json::json;
use thiserror::Error;

use crate::jwt::TokenError;

/// Authentication error.
///
/// Every variant is terminal: nothing in the session subsystem retries.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Covers both an unknown email and a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    /// The subject of a valid token no longer exists
    #[error("Identity not found")]
    IdentityNotFound,

    #[error("Identity lookup timed out")]
    UpstreamTimeout,

    #[error("Refresh cookie missing")]
    MissingRefreshCookie,

    #[error("Authorization header missing")]
    MissingAuthorization,

    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Identity store error: {0}")]
    IdentityStore(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::IdentityNotFound
            | AuthError::UpstreamTimeout
            | AuthError::MissingRefreshCookie
            | AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat => StatusCode::UNAUTHORIZED,
            AuthError::TokenSigning(_)
            | AuthError::IdentityStore(_)
            | AuthError::Configuration(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::BadRequest(_) => "BAD_REQUEST",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TokenInvalid => "INVALID_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::IdentityNotFound => "IDENTITY_NOT_FOUND",
            AuthError::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            AuthError::MissingRefreshCookie => "MISSING_REFRESH_COOKIE",
            AuthError::MissingAuthorization => "MISSING_AUTHORIZATION",
            AuthError::InvalidAuthorizationFormat => "INVALID_AUTHORIZATION",
            AuthError::TokenSigning(_) => "TOKEN_SIGNING_ERROR",
            AuthError::IdentityStore(_) => "IDENTITY_STORE_ERROR",
            AuthError::Configuration(_) => "CONFIGURATION_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to clients.
    ///
    /// Server-side details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AuthError::BadRequest(detail) => detail.clone(),
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::IdentityNotFound
            | AuthError::UpstreamTimeout
            | AuthError::MissingRefreshCookie => "Session is not valid".to_string(),
            AuthError::MissingAuthorization => "Authorization header required".to_string(),
            AuthError::InvalidAuthorizationFormat => {
                "Invalid authorization header format".to_string()
            }
            AuthError::TokenSigning(_)
            | AuthError::IdentityStore(_)
            | AuthError::Configuration(_)
            | AuthError::Internal(_) => "Authentication failed".to_string(),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Signing(detail) => AuthError::TokenSigning(detail),
            TokenError::Malformed(_)
            | TokenError::InvalidSignature
            | TokenError::UnsupportedAlgorithm
            | TokenError::ClaimMismatch => AuthError::TokenInvalid,
        }
    }
}

impl From<ValidatedJsonRejection> for AuthError {
    fn from(rejection: ValidatedJsonRejection) -> Self {
        AuthError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Authentication failure");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
