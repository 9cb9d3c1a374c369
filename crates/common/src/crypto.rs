//! Password hashing shared across Cinedex crates
//!
//! Stored credentials are argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`). Each hash carries its
//! own random salt and parameters, so verification needs no extra state.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::Error;

/// Hash a plaintext password into an argon2id PHC string with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a candidate password against a stored PHC hash.
///
/// Returns `false` for a mismatch and for a stored value that is not a
/// parseable PHC string; callers cannot tell the two apart. The digest
/// comparison inside `argon2` is constant-time.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
