//! Catalog domain: movies, genres, public and admin browsing

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Genre, Movie, MovieForEdit, MovieRecord};
pub use repository::{CatalogRepositories, GenreRepository, MovieRepository};

// Re-export API types
pub use api::routes;
pub use api::CatalogState;
