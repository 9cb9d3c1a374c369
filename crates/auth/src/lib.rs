//! Session authentication for the Cinedex API
//!
//! Stateless sessions built from a short-lived access token and a long-lived
//! refresh token. The refresh token travels in an `HttpOnly` cookie and is
//! rotated on every refresh; nothing is stored server-side.
//!
//! Extractors work with any state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod cookie;
mod error;
mod extractors;
mod identity;
mod issuer;
mod jwt;
mod memory;

pub use backend::{AuthBackend, RefreshStage, SessionGrant};
pub use claims::{Claims, SessionUser, TokenType};
pub use config::{AuthConfig, MAX_TOKEN_TTL_SECS, MIN_SECRET_LENGTH};
pub use cookie::{CookieManager, RefreshCookie, SameSite, REFRESH_COOKIE_NAME};
pub use error::AuthError;
pub use extractors::AuthUser;
pub use identity::{Identity, IdentityStore, IdentityStoreError};
pub use issuer::{TokenIssuer, TokenPair};
pub use jwt::{TokenError, TokenSigner, SIGNING_ALGORITHM};
pub use memory::InMemoryIdentityStore;
