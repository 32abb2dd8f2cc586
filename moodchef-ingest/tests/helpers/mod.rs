//! Test helper utilities
//!
//! Shared fixtures, fakes and database setup for moodchef-ingest tests

#![allow(dead_code, unused_imports)]

pub mod db_utils;
pub mod fakes;
pub mod fixtures;
pub mod mock_catalog;

pub use db_utils::{create_test_db, seed_approved, stored_emotions};
pub use fakes::{FakeCatalog, MemoryStore};
pub use fixtures::{tagged_recipe, tagged_recipes};
pub use mock_catalog::{MockCatalog, MockResponse};
