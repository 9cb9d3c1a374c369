//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::claims::SessionUser;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Caller holding a valid access token.
///
/// Expects `Authorization: Bearer <access token>`. Refresh tokens are
/// rejected.
#[derive(Debug)]
pub struct AuthUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let user = backend.authenticate_access_token(&token)?;

        Ok(AuthUser(user))
    }
}
