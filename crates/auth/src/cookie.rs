//! Refresh-token cookie construction and lookup
//!
//! The refresh cookie is the only channel through which a returning session
//! is recognised. Its name is a fixed constant shared with every client;
//! changing it invalidates all outstanding sessions.

use std::fmt;

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use axum::response::{IntoResponseParts, ResponseParts};
use chrono::{DateTime, Duration, Utc};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Name of the cookie carrying the refresh token.
///
/// No `__Host-` prefix: that prefix forbids a `Domain` attribute, and the
/// domain is configurable.
pub const REFRESH_COOKIE_NAME: &str = "cinedex_refresh_token";

const COOKIE_PATH: &str = "/";

/// `SameSite` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    Lax,
    #[default]
    Strict,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::None => write!(f, "None"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::Strict => write!(f, "Strict"),
        }
    }
}

/// A refresh cookie ready to be sent as a `Set-Cookie` header.
///
/// `Display` renders the header value.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshCookie {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub domain: Option<String>,
    pub expires: DateTime<Utc>,
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl fmt::Debug for RefreshCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshCookie")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("path", &self.path)
            .field("domain", &self.domain)
            .field("expires", &self.expires)
            .field("max_age", &self.max_age)
            .field("http_only", &self.http_only)
            .field("secure", &self.secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

impl fmt::Display for RefreshCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }
        write!(
            f,
            "; Expires={}; Max-Age={}",
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.max_age
        )?;
        if self.http_only {
            write!(f, "; HttpOnly")?;
        }
        if self.secure {
            write!(f, "; Secure")?;
        }
        write!(f, "; SameSite={}", self.same_site)
    }
}

impl IntoResponseParts for RefreshCookie {
    type Error = AuthError;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let value = HeaderValue::from_str(&self.to_string()).map_err(|e| {
            tracing::error!(error = %e, "Refresh cookie is not a valid header value");
            AuthError::Internal("Failed to build refresh cookie".to_string())
        })?;
        res.headers_mut().append(SET_COOKIE, value);
        Ok(res)
    }
}

/// Builds, expires and locates the refresh cookie
#[derive(Debug, Clone)]
pub struct CookieManager {
    domain: Option<String>,
    ttl: Duration,
    same_site: SameSite,
}

impl CookieManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            domain: config.cookie_domain.clone(),
            ttl: config.refresh_token_ttl,
            same_site: config.cookie_same_site,
        }
    }

    pub fn issue_refresh_cookie(&self, token: String) -> RefreshCookie {
        self.issue_refresh_cookie_at(token, Utc::now())
    }

    /// Cookie carrying `token`, expiring one refresh lifetime after `now`
    pub fn issue_refresh_cookie_at(&self, token: String, now: DateTime<Utc>) -> RefreshCookie {
        RefreshCookie {
            name: REFRESH_COOKIE_NAME,
            value: token,
            path: COOKIE_PATH,
            domain: self.domain.clone(),
            expires: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            max_age: self.ttl.num_seconds(),
            http_only: true,
            secure: true,
            same_site: self.same_site,
        }
    }

    /// Cookie instructing the client to delete the refresh cookie immediately.
    ///
    /// Needs no prior state; every call returns the same value.
    pub fn expire_refresh_cookie(&self) -> RefreshCookie {
        RefreshCookie {
            name: REFRESH_COOKIE_NAME,
            value: String::new(),
            path: COOKIE_PATH,
            domain: self.domain.clone(),
            // Unix epoch
            expires: DateTime::<Utc>::default(),
            max_age: 0,
            http_only: true,
            secure: true,
            same_site: self.same_site,
        }
    }

    /// Find the refresh token among all inbound `Cookie` headers.
    ///
    /// Matches the cookie name exactly; an empty value counts as absent.
    pub fn find_refresh_token(headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == REFRESH_COOKIE_NAME)
            .map(|(_, value)| value.trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }
}
