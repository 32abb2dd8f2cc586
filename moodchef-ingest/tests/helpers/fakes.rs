//! In-memory collaborators for pipeline tests

use async_trait::async_trait;
use moodchef_common::{Error, Result};
use moodchef_ingest::db::RecipeStore;
use moodchef_ingest::models::{Category, ProcessedRecipe, RawRecipe};
use moodchef_ingest::services::{CatalogError, CatalogSource};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Catalog answering from a fixed query → results map
#[derive(Default)]
pub struct FakeCatalog {
    responses: HashMap<String, Vec<RawRecipe>>,
    failing: Vec<String>,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, recipes: Vec<RawRecipe>) -> Self {
        self.responses.insert(query.to_string(), recipes);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    /// Number of search calls issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn search(&self, query: &str) -> std::result::Result<Vec<RawRecipe>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|q| q == query) {
            return Err(CatalogError::ApiError(503, "unavailable".to_string()));
        }
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

/// Store holding counts and written records in memory
#[derive(Default)]
pub struct MemoryStore {
    counts: BTreeMap<Category, usize>,
    fail_counts: bool,
    fail_batches: Vec<usize>,
    batch_calls: AtomicUsize,
    written: Mutex<Vec<ProcessedRecipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every category at `count`
    pub fn with_all_counts(mut self, count: usize) -> Self {
        for category in Category::ALL {
            self.counts.insert(category, count);
        }
        self
    }

    pub fn failing_counts(mut self) -> Self {
        self.fail_counts = true;
        self
    }

    /// Fail the upsert calls at these zero-based positions
    pub fn failing_batches(mut self, batches: Vec<usize>) -> Self {
        self.fail_batches = batches;
        self
    }

    pub fn written(&self) -> Vec<ProcessedRecipe> {
        self.written.lock().unwrap().clone()
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn approved_counts(&self) -> Result<BTreeMap<Category, usize>> {
        if self.fail_counts {
            return Err(Error::Internal("count query failed".to_string()));
        }
        Ok(self.counts.clone())
    }

    async fn upsert_batch(&self, recipes: &[ProcessedRecipe]) -> Result<()> {
        let call = self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_batches.contains(&call) {
            return Err(Error::Internal(format!("batch {} rejected", call)));
        }
        self.written.lock().unwrap().extend_from_slice(recipes);
        Ok(())
    }
}
