//! Route definitions for Catalog domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{admin, genres, movies, status};
use super::middleware::CatalogState;

/// Create public browsing routes
fn public_routes() -> Router<CatalogState> {
    Router::new()
        .route("/", get(status::home))
        .route("/movies", get(movies::list_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movie", post(movies::display_movie))
        .route("/genres", get(genres::list_genres))
}

/// Create routes guarded by an access token
fn admin_routes() -> Router<CatalogState> {
    Router::new()
        .route("/admin/movies", get(admin::movie_catalog))
        .route("/admin/movies/{id}", get(admin::movie_for_edit))
}

/// Create all Catalog domain API routes
pub fn routes() -> Router<CatalogState> {
    Router::new()
        .merge(public_routes())
        .merge(admin_routes())
}
