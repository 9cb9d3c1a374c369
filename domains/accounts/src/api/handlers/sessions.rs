//! Session API handlers
//!
//! Implements:
//! - POST /authenticate - Log in with email and password
//! - GET /refresh - Exchange the refresh cookie for a new token pair
//! - GET /logout - Expire the refresh cookie
//!
//! Login and refresh answer 202 with `{access_token, refresh_token}` and a
//! `Set-Cookie` carrying the new refresh token.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use cinedex_auth::AuthError;
use cinedex_common::{ValidatedJson, ValidatedJsonRejection};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::AccountsState;

/// Request for credential login
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,

    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

/// POST /authenticate - Log in with email and password
pub async fn authenticate(
    State(state): State<AccountsState>,
    payload: Result<ValidatedJson<LoginRequest>, ValidatedJsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let ValidatedJson(request) = payload?;

    let grant = state
        .auth
        .authenticate_credentials(request.email.trim(), &request.password)
        .await?;

    Ok((StatusCode::ACCEPTED, grant.cookie, Json(grant.tokens)))
}

/// GET /refresh - Exchange the refresh cookie for a new token pair
pub async fn refresh(
    State(state): State<AccountsState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthError> {
    let grant = state.auth.refresh_session(&headers).await?;

    Ok((StatusCode::ACCEPTED, grant.cookie, Json(grant.tokens)))
}

/// GET /logout - Expire the refresh cookie
///
/// Succeeds whether or not a session existed. Access tokens issued earlier
/// are not revoked and keep working until they expire (at most the access
/// token lifetime, 15 minutes by default).
pub async fn logout(State(state): State<AccountsState>) -> impl IntoResponse {
    (StatusCode::ACCEPTED, state.auth.logout(), ())
}
