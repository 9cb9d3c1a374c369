//! Authentication configuration

use std::fmt;

use chrono::Duration;
use cinedex_common::Config;

use crate::cookie::SameSite;
use crate::error::AuthError;

/// Minimum required length for the signing secret in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted token lifetime in seconds (one year).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Authentication configuration.
///
/// Loaded once at startup and shared read-only by every component of the
/// session subsystem.
#[derive(Clone)]
pub struct AuthConfig {
    pub(crate) jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    /// `Domain` attribute of the refresh cookie; `None` omits it.
    pub cookie_domain: Option<String>,
    pub cookie_same_site: SameSite,
    /// Access token lifetime. Default: 15 minutes.
    pub access_token_ttl: Duration,
    /// Refresh token (and refresh cookie) lifetime. Default: 24 hours.
    pub refresh_token_ttl: Duration,
    /// Bound on a single identity store lookup. Default: 3 seconds.
    pub identity_lookup_timeout: std::time::Duration,
}

impl fmt::Debug for AuthConfig {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("cookie_domain", &self.cookie_domain)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("identity_lookup_timeout", &self.identity_lookup_timeout)
            .finish()
    }
}

impl AuthConfig {
    /// Create a configuration with default lifetimes and no cookie domain.
    ///
    /// # Errors
    /// Returns `AuthError::Configuration` if the secret is shorter than
    /// [`MIN_SECRET_LENGTH`] bytes.
    pub fn new(
        jwt_secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let jwt_secret = jwt_secret.into();

        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "JWT secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                jwt_secret.len()
            )));
        }

        Ok(Self {
            jwt_secret,
            issuer: issuer.into(),
            audience: audience.into(),
            cookie_domain: None,
            cookie_same_site: SameSite::Strict,
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::hours(24),
            identity_lookup_timeout: std::time::Duration::from_secs(3),
        })
    }

    /// Build the auth configuration from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        if config.access_token_ttl_secs <= 0 || config.refresh_token_ttl_secs <= 0 {
            return Err(AuthError::Configuration(
                "Token lifetimes must be positive".to_string(),
            ));
        }

        if config.access_token_ttl_secs > MAX_TOKEN_TTL_SECS
            || config.refresh_token_ttl_secs > MAX_TOKEN_TTL_SECS
        {
            return Err(AuthError::Configuration(format!(
                "Token lifetimes must not exceed {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }

        let domain = config.cookie_domain.trim();

        Ok(Self::new(
            config.jwt_secret.clone(),
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
        )?
        .with_cookie_domain((!domain.is_empty()).then(|| domain.to_string()))
        .with_access_token_ttl(Duration::seconds(config.access_token_ttl_secs))
        .with_refresh_token_ttl(Duration::seconds(config.refresh_token_ttl_secs))
        .with_identity_lookup_timeout(std::time::Duration::from_millis(
            config.identity_lookup_timeout_ms,
        )))
    }

    #[must_use]
    pub fn with_cookie_domain(mut self, domain: Option<String>) -> Self {
        self.cookie_domain = domain;
        self
    }

    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        self
    }

    #[must_use]
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_identity_lookup_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.identity_lookup_timeout = timeout;
        self
    }
}
