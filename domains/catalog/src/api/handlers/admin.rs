//! Admin catalog handlers
//!
//! Every handler here requires a valid access token (`AuthUser`).

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use cinedex_auth::AuthUser;
use cinedex_common::Result;

use crate::api::handlers::movies::{load_movie, movie_id};
use crate::api::middleware::CatalogState;
use crate::domain::entities::{Movie, MovieForEdit};

/// GET /admin/movies - Full catalog for management
pub async fn movie_catalog(
    AuthUser(user): AuthUser,
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Movie>>> {
    tracing::debug!(user_id = user.id, "Admin catalog requested");
    let movies = state.repos.movies.list().await?;
    Ok(Json(movies))
}

/// GET /admin/movies/{id} - Movie plus every genre, movie's genres checked
pub async fn movie_for_edit(
    AuthUser(user): AuthUser,
    State(state): State<CatalogState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<MovieForEdit>> {
    let id = movie_id(path)?;
    tracing::debug!(user_id = user.id, movie_id = id, "Movie requested for edit");

    let movie = load_movie(&state, id).await?;
    let movie_genres = movie.genres.clone().unwrap_or_default();
    let all_genres = state.repos.genres.list().await?;

    Ok(Json(MovieForEdit::new(movie, movie_genres, all_genres)))
}
