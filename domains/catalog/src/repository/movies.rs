//! Movie repository

use crate::domain::entities::{Movie, MovieRecord};
use cinedex_common::Result;
use sqlx::PgPool;

/// Columns read for every movie query. NULL text columns read as empty.
const MOVIE_COLUMNS: &str = "\
    id, title, runtime, imdb, COALESCE(imdb_id, '') AS imdb_id, \
    release, mpaa, description, COALESCE(poster, '') AS poster";

#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
    poster_base_url: String,
}

impl MovieRepository {
    pub fn new(pool: PgPool, poster_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            poster_base_url: poster_base_url.into(),
        }
    }

    /// All movies ordered by title
    pub async fn list(&self) -> Result<Vec<Movie>> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title");
        let records = sqlx::query_as::<_, MovieRecord>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = records.len(), "Loaded movies");

        Ok(records
            .into_iter()
            .map(|record| Movie::from_record(record, &self.poster_base_url))
            .collect())
    }

    /// Find movie by ID, without genres
    pub async fn find(&self, id: i32) -> Result<Option<Movie>> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");
        let record = sqlx::query_as::<_, MovieRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(|record| Movie::from_record(record, &self.poster_base_url)))
    }
}
