//! Router-level integration tests
//!
//! The Identity Store is in memory and the catalog pool is lazy, so no
//! database is needed. Routes that would query movies are only exercised up
//! to their auth and input checks.

#![allow(dead_code)]

mod catalog;
mod common;
mod sessions;
