//! Cinedex application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use cinedex_accounts::{AccountsState, UserRepository};
use cinedex_auth::{AuthBackend, AuthConfig, IdentityStore};
use cinedex_catalog::{CatalogRepositories, CatalogState};
use cinedex_common::Config;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Create the main application router backed by Postgres for every store
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let store = Arc::new(UserRepository::new(pool.clone()));
    build_router(config, pool, store)
}

/// Create the router with an explicit Identity Store.
///
/// The catalog always reads from `pool`.
pub fn build_router(
    config: &Config,
    pool: PgPool,
    store: Arc<dyn IdentityStore>,
) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig::from_config(config)?;
    tracing::debug!(auth = ?auth_config, "Auth configuration loaded");

    let auth = AuthBackend::new(auth_config, store);

    let accounts_state = AccountsState { auth: auth.clone() };
    let catalog_state = CatalogState {
        repos: CatalogRepositories::new(pool, config.poster_base_url.clone()),
        auth,
    };

    // Build router - compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(cinedex_accounts::routes().with_state(accounts_state))
        .merge(cinedex_catalog::routes().with_state(catalog_state))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&config.allowed_origin)?)
                .into_inner(),
        );

    Ok(app)
}

/// CORS for the single browser origin the SPA is served from.
///
/// Credentials are allowed so the refresh cookie travels on cross-origin
/// requests.
pub fn build_cors_layer(allowed_origin: &str) -> Result<CorsLayer, anyhow::Error> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| anyhow::anyhow!("ALLOWED_ORIGIN is not a valid origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
