//! Destination store access
//!
//! The pipeline talks to the store through [`RecipeStore`]; the SQLite
//! implementation lives in [`recipes`].

pub mod recipes;
pub mod runs;

pub use recipes::SqliteRecipeStore;

use crate::models::{Category, ProcessedRecipe};
use async_trait::async_trait;
use moodchef_common::Result;
use std::collections::BTreeMap;

/// Collaborator store the pipeline reads counts from and writes recipes to
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Current number of approved recipes per category
    async fn approved_counts(&self) -> Result<BTreeMap<Category, usize>>;

    /// Upsert one batch keyed by title; all-or-nothing per call
    async fn upsert_batch(&self, recipes: &[ProcessedRecipe]) -> Result<()>;
}
