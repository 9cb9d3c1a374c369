//! Accounts domain: user lookup, login, session refresh, logout

pub mod api;
pub mod repository;

pub use repository::UserRepository;

// Re-export API types
pub use api::routes;
pub use api::AccountsState;

pub use cinedex_auth::{AuthBackend, AuthConfig, AuthError, AuthUser};
