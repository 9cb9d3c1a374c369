//! Identity Store collaborator
//!
//! The session subsystem looks users up by ID (refresh) and by email
//! (login). Implementations live outside this crate; the Postgres one is in
//! the accounts domain and an in-memory one is in [`crate::memory`].

use std::fmt;

use thiserror::Error;

use crate::claims::SessionUser;

/// A stored user record, including the credential hash
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl From<&Identity> for SessionUser {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
        }
    }
}

/// Identity store failures other than "not found"
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of user records by ID or email.
///
/// `Ok(None)` means the user does not exist. Callers bound every call with
/// their own timeout.
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityStoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityStoreError>;
}
