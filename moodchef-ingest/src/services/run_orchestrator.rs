//! Run orchestrator
//!
//! One pipeline run: read approved counts, compute the shortfall, and when any
//! category is short, fetch → classify → allocate → finalize → write.
//!
//! Preconditions are fatal (missing credential, failed count read). Anything
//! after that degrades into the returned summary instead of failing the run.

use super::allocator::{allocate, AllocationState};
use super::batch_writer::write_batches;
use super::catalog_client::{CatalogClient, CatalogSource};
use super::catalog_fetcher::fetch_catalog;
use super::classifier::classify_all;
use super::recipe_finalizer::finalize;
use super::taxonomy::TAXONOMY;
use crate::db::runs::{save_run, RunRecord};
use crate::db::{RecipeStore, SqliteRecipeStore};
use crate::models::{Category, RunReport, RunSummary};
use chrono::Utc;
use moodchef_common::config::{resolve_catalog_api_key, TomlConfig};
use moodchef_common::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// Per-run settings
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub queries: Vec<String>,
    /// Target and cap per category
    pub target_per_category: usize,
    pub batch_size: usize,
    pub premium_probability: f64,
}

impl RunConfig {
    /// Settings from the loaded TOML, validated
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.pipeline.validate()?;

        let queries: Vec<String> = config
            .catalog
            .queries
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect();

        if queries.is_empty() {
            return Err(Error::Config(
                "catalog.queries must contain at least one non-empty query".to_string(),
            ));
        }

        Ok(Self {
            queries,
            target_per_category: config.pipeline.target_per_category,
            batch_size: config.pipeline.batch_size,
            premium_probability: config.pipeline.premium_probability,
        })
    }
}

/// `max(0, target - current)` for every category
pub fn shortfall(current: &BTreeMap<Category, usize>, target: usize) -> BTreeMap<Category, usize> {
    Category::ALL
        .iter()
        .map(|c| (*c, target.saturating_sub(current.get(c).copied().unwrap_or(0))))
        .collect()
}

/// Sequences one run against a catalog source and a recipe store
pub struct RunOrchestrator<C, S> {
    source: C,
    store: S,
    config: RunConfig,
}

impl<C, S> RunOrchestrator<C, S>
where
    C: CatalogSource,
    S: RecipeStore,
{
    pub fn new(source: C, store: S, config: RunConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run with an entropy-seeded RNG for premium sampling
    pub async fn run(&self) -> Result<RunSummary> {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(&mut rng).await
    }

    /// Run with a caller-supplied RNG for premium sampling
    pub async fn run_with_rng<R>(&self, rng: &mut R) -> Result<RunSummary>
    where
        R: Rng + Send + ?Sized,
    {
        let target = self.config.target_per_category;

        let current = self.store.approved_counts().await?;
        let needed = shortfall(&current, target);
        let total_needed: usize = needed.values().sum();

        if total_needed == 0 {
            info!(target, "All categories at target, nothing to fetch");
            return Ok(RunSummary::NothingToDo {
                message: format!(
                    "All categories already have at least {} approved recipes",
                    target
                ),
                current,
            });
        }

        info!(
            target,
            total_needed,
            queries = self.config.queries.len(),
            "Starting ingest run"
        );

        let fetched = fetch_catalog(&self.source, &self.config.queries).await;
        let fetched_count = fetched.len();

        let scored = classify_all(fetched, TAXONOMY);
        let classified_count = scored.len();

        let allocation = allocate(scored, AllocationState::seeded(&current, target));
        let assigned = allocation.assigned_per_category();
        let dropped = allocation.dropped;

        let processed = finalize(allocation.assigned, self.config.premium_probability, rng);
        let premium = processed.iter().filter(|r| r.is_premium).count();

        info!(
            fetched = fetched_count,
            classified = classified_count,
            assigned = processed.len(),
            dropped,
            premium,
            "Allocation complete"
        );

        let outcome = write_batches(&self.store, &processed, self.config.batch_size).await;

        if outcome.errors.is_empty() {
            info!(success_count = outcome.success_count, "Ingest run complete");
        } else {
            warn!(
                success_count = outcome.success_count,
                failed_batches = outcome.errors.len(),
                "Ingest run completed with batch errors"
            );
        }

        Ok(RunSummary::Completed(RunReport {
            total_processed: processed.len(),
            success_count: outcome.success_count,
            errors: outcome.errors,
            fetched: fetched_count,
            classified: classified_count,
            dropped,
            needed,
            assigned,
        }))
    }
}

/// Run once against the configured catalog and the given database
///
/// The run is recorded in the run log; a failure to record it is logged only.
pub async fn execute_run(db: &SqlitePool, config: &TomlConfig) -> Result<RunSummary> {
    let api_key = resolve_catalog_api_key(config)?;
    let run_config = RunConfig::from_toml(config)?;
    let client = CatalogClient::from_config(&config.catalog, api_key)
        .map_err(|e| Error::Internal(format!("Failed to create catalog client: {}", e)))?;
    let store = SqliteRecipeStore::new(db.clone());

    let started_at = Utc::now();
    let summary = RunOrchestrator::new(client, store, run_config).run().await?;

    let record = RunRecord::from_summary(&summary, started_at);
    if let Err(e) = save_run(db, &record).await {
        error!(run_id = %record.run_id, error = %e, "Failed to record ingest run");
    }

    Ok(summary)
}
