//! Route definitions for Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::sessions;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/authenticate", post(sessions::authenticate))
        .route("/refresh", get(sessions::refresh))
        .route("/logout", get(sessions::logout))
}
