//! Public movie API handlers
//!
//! Implements:
//! - GET /movies - All movies ordered by title
//! - GET /movies/{id} - One movie with its genres
//! - POST /movie - Same lookup with the ID in the body

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use cinedex_common::{Error, Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::CatalogState;
use crate::domain::entities::Movie;

/// Request for `POST /movie`
#[derive(Debug, Deserialize, Validate)]
pub struct MovieIdRequest {
    #[validate(range(min = 1))]
    pub id: i32,
}

/// Turn a path rejection into the API's validation error shape.
pub(crate) fn movie_id(path: std::result::Result<Path<i32>, PathRejection>) -> Result<i32> {
    path.map(|Path(id)| id)
        .map_err(|e| Error::Validation(format!("Invalid movie ID: {}", e.body_text())))
}

/// Load a movie and its genres, or `NotFound`.
pub(crate) async fn load_movie(state: &CatalogState, id: i32) -> Result<Movie> {
    let movie = state
        .repos
        .movies
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Movie not found".to_string()))?;

    let genres = state.repos.genres.list_for_movie(id).await?;

    Ok(movie.with_genres(genres))
}

/// GET /movies - All movies ordered by title
pub async fn list_movies(State(state): State<CatalogState>) -> Result<Json<Vec<Movie>>> {
    let movies = state.repos.movies.list().await?;
    Ok(Json(movies))
}

/// GET /movies/{id} - One movie with its genres
pub async fn get_movie(
    State(state): State<CatalogState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Movie>> {
    let id = movie_id(path)?;
    Ok(Json(load_movie(&state, id).await?))
}

/// POST /movie - One movie with its genres, ID taken from the body
pub async fn display_movie(
    State(state): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<MovieIdRequest>,
) -> Result<Json<Movie>> {
    Ok(Json(load_movie(&state, request.id).await?))
}
