//! Genre repository

use crate::domain::entities::Genre;
use cinedex_common::Result;
use sqlx::PgPool;

#[derive(Clone)]
pub struct GenreRepository {
    pool: PgPool,
}

impl GenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All genres ordered by name
    pub async fn list(&self) -> Result<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, genre, false AS checked FROM genres ORDER BY genre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Genres attached to one movie, ordered by name
    pub async fn list_for_movie(&self, movie_id: i32) -> Result<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.genre, false AS checked
            FROM movies_genres mg
            INNER JOIN genres g ON g.id = mg.genre_id
            WHERE mg.movie_id = $1
            ORDER BY g.genre
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }
}
