//! Domain entities for the Catalog domain
//!
//! Movies are stored with their runtime in total minutes and a bare poster
//! file name; the API shape splits the runtime and expands the poster to an
//! absolute URL.

use serde::{Deserialize, Serialize};

/// A movie row as stored
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: i32,
    pub title: String,
    /// Total minutes
    pub runtime: i32,
    pub imdb: f32,
    pub imdb_id: String,
    pub release: i32,
    pub mpaa: String,
    pub description: String,
    /// File name under the poster directory, or empty
    pub poster: String,
}

/// A movie as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub poster: String,
    /// Whole hours
    #[serde(rename = "runtime")]
    pub runtime_hours: i32,
    pub runtime_minutes: i32,
    pub imdb: f32,
    #[serde(rename = "imdbId")]
    pub imdb_id: String,
    pub release: i32,
    pub mpaa: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres_array: Option<Vec<i32>>,
}

impl Movie {
    pub fn from_record(record: MovieRecord, poster_base_url: &str) -> Self {
        let (runtime_hours, runtime_minutes) = split_runtime(record.runtime);

        Self {
            id: record.id,
            title: record.title,
            poster: poster_url(poster_base_url, &record.poster),
            runtime_hours,
            runtime_minutes,
            imdb: record.imdb,
            imdb_id: record.imdb_id,
            release: record.release,
            mpaa: record.mpaa,
            description: record.description,
            genres: None,
            genres_array: None,
        }
    }

    #[must_use]
    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }
}

/// Split a total runtime in minutes into whole hours and remaining minutes.
pub fn split_runtime(total_minutes: i32) -> (i32, i32) {
    (total_minutes / 60, total_minutes % 60)
}

/// Absolute poster URL for a stored file name; empty stays empty.
pub fn poster_url(base_url: &str, stored: &str) -> String {
    let file = stored.trim();
    if file.is_empty() {
        return String::new();
    }
    format!("{}{}", base_url, file)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: i32,
    pub genre: String,
    /// Set in the edit view for genres the movie belongs to
    pub checked: bool,
}

/// Admin edit view: a movie plus every genre, with the movie's own genres
/// checked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieForEdit {
    pub movie: Movie,
    pub genres: Vec<Genre>,
}

impl MovieForEdit {
    /// Build the edit view from a movie, its genres and the full genre list.
    pub fn new(movie: Movie, movie_genres: Vec<Genre>, all_genres: Vec<Genre>) -> Self {
        let ids: Vec<i32> = movie_genres.iter().map(|g| g.id).collect();

        let genres = all_genres
            .into_iter()
            .map(|genre| Genre {
                checked: ids.contains(&genre.id),
                ..genre
            })
            .collect();

        let mut movie = movie.with_genres(movie_genres);
        movie.genres_array = Some(ids);

        Self { movie, genres }
    }
}
