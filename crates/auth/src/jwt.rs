//! Token signing, verification and bearer-token extraction

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// The only algorithm tokens are signed and accepted with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signer-level failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token header names an algorithm other than HS256")]
    UnsupportedAlgorithm,

    #[error("Token issuer or audience does not match")]
    ClaimMismatch,

    #[error("Token has expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::UnsupportedAlgorithm
            }
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::ClaimMismatch,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Creates and verifies compact signed claim sets with a shared secret.
///
/// The algorithm is fixed at [`SIGNING_ALGORITHM`]; the `alg` field of an
/// inbound token is never trusted.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenSigner {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// Expiry has zero grace: a token is expired from the second `exp` names.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        // Checked below against the caller's clock instead of the system clock
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            TokenError::from(e)
        })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
