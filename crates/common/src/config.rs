//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Workspace crates at debug, the server binary's own target at info
pub const DEFAULT_RUST_LOG: &str = "cinedex=debug,local=info";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Token signing
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,

    /// Refresh cookie `Domain` attribute. Empty means the attribute is omitted.
    pub cookie_domain: String,

    /// Token lifetimes in seconds
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,

    /// Upper bound for a single identity store lookup
    pub identity_lookup_timeout_ms: u64,

    /// Browser origin allowed by CORS (the SPA frontend)
    pub allowed_origin: String,

    /// Prefix joined to stored poster file names
    pub poster_base_url: String,
    /// Directory served under `/static`
    pub static_dir: String,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: String,
    pub port: u16,
}

impl fmt::Debug for Config {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("cookie_domain", &self.cookie_domain)
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("identity_lookup_timeout_ms", &self.identity_lookup_timeout_ms)
            .field("allowed_origin", &self.allowed_origin)
            .field("poster_base_url", &self.poster_base_url)
            .field("static_dir", &self.static_dir)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "example.com".to_string()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "example.com".to_string()),

            cookie_domain: env::var("COOKIE_DOMAIN").unwrap_or_else(|_| "localhost".to_string()),

            access_token_ttl_secs: parse_or("ACCESS_TOKEN_TTL_SECS", 15 * 60)?,
            refresh_token_ttl_secs: parse_or("REFRESH_TOKEN_TTL_SECS", 24 * 60 * 60)?,
            identity_lookup_timeout_ms: parse_or("IDENTITY_LOOKUP_TIMEOUT_MS", 3_000)?,

            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            poster_base_url: env::var("POSTER_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/static/images/".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            port: parse_or("PORT", 8080)?,
        };

        Ok(config)
    }
}

/// Parse an optional numeric variable; a present but unparseable value is an error.
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is not a valid number: {e}")),
        Err(_) => Ok(default),
    }
}
