pub mod admin;
pub mod genres;
pub mod movies;
pub mod status;
