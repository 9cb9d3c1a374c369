//! Accounts domain state and auth backend integration

use axum::extract::FromRef;
use cinedex_auth::AuthBackend;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub auth: AuthBackend,
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
