//! Access/refresh token pair issuance

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::{Claims, SessionUser, TokenType};
use crate::config::AuthConfig;
use crate::jwt::{TokenError, TokenSigner};

/// A freshly issued pair of signed tokens.
///
/// Never mutated; each login or refresh supersedes the previous pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Composes and signs access and refresh claims for a [`SessionUser`]
#[derive(Clone)]
pub struct TokenIssuer {
    signer: TokenSigner,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(signer: TokenSigner, config: &AuthConfig) -> Self {
        Self {
            signer,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub fn issue_pair(&self, user: &SessionUser) -> Result<TokenPair, TokenError> {
        self.issue_pair_at(user, Utc::now())
    }

    /// Issue a pair as of `now`.
    ///
    /// Each token gets its own random `jti`, so pairs issued within the same
    /// second never collide.
    pub fn issue_pair_at(
        &self,
        user: &SessionUser,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        let access = self.claims(user, now, self.access_ttl, TokenType::Access)?;
        let refresh = self.claims(user, now, self.refresh_ttl, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token: self.signer.sign(&access)?,
            refresh_token: self.signer.sign(&refresh)?,
        })
    }

    fn claims(
        &self,
        user: &SessionUser,
        now: DateTime<Utc>,
        ttl: Duration,
        typ: TokenType,
    ) -> Result<Claims, TokenError> {
        Ok(Claims {
            sub: user.id.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expiry_timestamp(now, ttl)?,
            name: user.display_name(),
            given_name: user.first_name.clone(),
            family_name: user.last_name.clone(),
            jti: Uuid::new_v4().to_string(),
            typ,
        })
    }
}

/// `now + ttl` in whole seconds, rounded up so a token never expires before
/// its full lifetime has passed.
fn expiry_timestamp(now: DateTime<Utc>, ttl: Duration) -> Result<i64, TokenError> {
    let end = now
        .checked_add_signed(ttl)
        .ok_or_else(|| TokenError::Signing("Token expiry is out of range".to_string()))?;
    Ok(end.timestamp() + i64::from(end.timestamp_subsec_nanos() > 0))
}
