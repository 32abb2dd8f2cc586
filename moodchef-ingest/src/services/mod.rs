//! Pipeline services
//!
//! Leaves first: catalog client and fetcher, taxonomy and classifier,
//! allocator, finalizer, batch writer, and the orchestrator that sequences them.

pub mod allocator;
pub mod batch_writer;
pub mod catalog_client;
pub mod catalog_fetcher;
pub mod classifier;
pub mod recipe_finalizer;
pub mod run_orchestrator;
pub mod taxonomy;

pub use allocator::{allocate, Allocation, AllocationState, Assignment};
pub use batch_writer::write_batches;
pub use catalog_client::{CatalogClient, CatalogError, CatalogSource};
pub use catalog_fetcher::{dedup_by_name, fetch_catalog};
pub use classifier::{classify, classify_all, CandidateMatch, ScoredRecipe};
pub use recipe_finalizer::finalize;
pub use run_orchestrator::{execute_run, shortfall, RunConfig, RunOrchestrator};
pub use taxonomy::{Predicate, Rule, TAXONOMY};
