//! Repository implementations for the Catalog domain

pub mod genres;
pub mod movies;

use sqlx::PgPool;

pub use genres::GenreRepository;
pub use movies::MovieRepository;

/// Combined repository access for the Catalog domain
#[derive(Clone)]
pub struct CatalogRepositories {
    pub movies: MovieRepository,
    pub genres: GenreRepository,
}

impl CatalogRepositories {
    pub fn new(pool: PgPool, poster_base_url: impl Into<String>) -> Self {
        Self {
            movies: MovieRepository::new(pool.clone(), poster_base_url),
            genres: GenreRepository::new(pool),
        }
    }
}
