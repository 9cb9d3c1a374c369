//! Session authentication backend
//!
//! Owns the token issuer, cookie manager and Identity Store handle, and
//! implements the three session flows: credential login, refresh and
//! logout. Access-token checks for guarded routes also go through here.
//!
//! Domain states expose this via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::http::HeaderMap;
use cinedex_common::{hash_password, verify_password};

use crate::claims::{SessionUser, TokenType};
use crate::config::AuthConfig;
use crate::cookie::{CookieManager, RefreshCookie};
use crate::error::AuthError;
use crate::identity::{Identity, IdentityStore, IdentityStoreError};
use crate::issuer::{TokenIssuer, TokenPair};
use crate::jwt::TokenSigner;

/// Stages of a refresh request, in order.
///
/// A request that fails is rejected at the stage it had reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStage {
    AwaitingCookie,
    Validating,
    ResolvingIdentity,
    Reissuing,
}

/// Outcome of a successful login or refresh
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: SessionUser,
    pub tokens: TokenPair,
    pub cookie: RefreshCookie,
}

/// Concrete authentication backend.
///
/// Cheap to clone; every field is read-only after construction.
#[derive(Clone)]
pub struct AuthBackend {
    config: AuthConfig,
    issuer: TokenIssuer,
    cookies: CookieManager,
    store: Arc<dyn IdentityStore>,
    /// Verified against when the email is unknown
    dummy_hash: Option<Arc<str>>,
}

impl AuthBackend {
    pub fn new(config: AuthConfig, store: Arc<dyn IdentityStore>) -> Self {
        let signer = TokenSigner::new(&config);
        Self {
            issuer: TokenIssuer::new(signer, &config),
            cookies: CookieManager::new(&config),
            config,
            store,
            dummy_hash: hash_password(DUMMY_PASSWORD)
                .inspect_err(|e| {
                    tracing::warn!(error = %e, "Failed to build dummy password hash")
                })
                .ok()
                .map(Arc::from),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn cookies(&self) -> &CookieManager {
        &self.cookies
    }

    /// Log in with email and password.
    ///
    /// An unknown email and a wrong password both yield
    /// `AuthError::InvalidCredentials`, and both pay for one hash
    /// verification so response timing does not reveal which it was.
    pub async fn authenticate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionGrant, AuthError> {
        let identity = self
            .lookup(self.store.find_by_email(email))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Login lookup failed"))?;

        let stored_hash = identity.as_ref().map(|i| i.password_hash.clone());
        let dummy_hash = self.dummy_hash.clone();
        let candidate = password.to_string();

        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => verify_password(&hash, &candidate),
            None => {
                if let Some(dummy) = dummy_hash {
                    verify_password(&dummy, &candidate);
                }
                false
            }
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AuthError::Internal("Password verification failed".to_string())
        })?;

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => {
                tracing::info!("Login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let grant = self.grant(SessionUser::from(&identity))?;
        tracing::info!(user_id = grant.user.id, "User logged in");
        Ok(grant)
    }

    /// Exchange the refresh cookie in `headers` for a new token pair and cookie.
    ///
    /// Runs in a single pass with no retries. On rejection no cookie is set;
    /// the client keeps its old cookie until it expires or the user logs in
    /// again.
    pub async fn refresh_session(&self, headers: &HeaderMap) -> Result<SessionGrant, AuthError> {
        let mut stage = RefreshStage::AwaitingCookie;

        self.run_refresh(headers, &mut stage).await.inspect_err(|e| {
            tracing::info!(stage = ?stage, error = %e, "Refresh rejected");
        })
    }

    async fn run_refresh(
        &self,
        headers: &HeaderMap,
        stage: &mut RefreshStage,
    ) -> Result<SessionGrant, AuthError> {
        let token =
            CookieManager::find_refresh_token(headers).ok_or(AuthError::MissingRefreshCookie)?;

        *stage = RefreshStage::Validating;
        let claims = self.issuer.signer().verify(&token)?;
        if claims.typ != TokenType::Refresh {
            return Err(AuthError::TokenInvalid);
        }
        let user_id = claims.user_id().ok_or(AuthError::TokenInvalid)?;

        *stage = RefreshStage::ResolvingIdentity;
        let identity = self
            .lookup(self.store.find_by_id(user_id))
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        *stage = RefreshStage::Reissuing;
        let grant = self.grant(SessionUser::from(&identity))?;
        tracing::debug!(user_id = grant.user.id, "Session refreshed");
        Ok(grant)
    }

    /// Expire the refresh cookie.
    ///
    /// Always succeeds. Access tokens already issued stay valid until
    /// their own expiry; nothing is revoked server-side.
    pub fn logout(&self) -> RefreshCookie {
        self.cookies.expire_refresh_cookie()
    }

    /// Validate an access token and rebuild its [`SessionUser`] from the
    /// claims. No store lookup.
    pub fn authenticate_access_token(&self, token: &str) -> Result<SessionUser, AuthError> {
        let claims = self.issuer.signer().verify(token)?;
        if claims.typ != TokenType::Access {
            return Err(AuthError::TokenInvalid);
        }
        SessionUser::from_claims(&claims).ok_or(AuthError::TokenInvalid)
    }

    fn grant(&self, user: SessionUser) -> Result<SessionGrant, AuthError> {
        let tokens = self.issuer.issue_pair(&user)?;
        let cookie = self
            .cookies
            .issue_refresh_cookie(tokens.refresh_token.clone());

        Ok(SessionGrant {
            user,
            tokens,
            cookie,
        })
    }

    /// Run one Identity Store call bounded by the configured timeout.
    async fn lookup<F>(&self, call: F) -> Result<Option<Identity>, AuthError>
    where
        F: Future<Output = Result<Option<Identity>, IdentityStoreError>>,
    {
        let timeout = self.config.identity_lookup_timeout;

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(identity)) => Ok(identity),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Identity store lookup failed");
                Err(AuthError::IdentityStore(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Identity store lookup timed out"
                );
                Err(AuthError::UpstreamTimeout)
            }
        }
    }
}

const DUMMY_PASSWORD: &str = "cinedex-dummy-password";
