//! Genre API handlers

use axum::{extract::State, Json};
use cinedex_common::Result;

use crate::api::middleware::CatalogState;
use crate::domain::entities::Genre;

/// GET /genres - All genres ordered by name
pub async fn list_genres(State(state): State<CatalogState>) -> Result<Json<Vec<Genre>>> {
    let genres = state.repos.genres.list().await?;
    Ok(Json(genres))
}
