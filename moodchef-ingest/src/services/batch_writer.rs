//! Persistence batcher
//!
//! Writes processed recipes in fixed-size chunks, one upsert per chunk, in
//! order. A failed chunk is recorded and skipped; later chunks still run.

use crate::db::RecipeStore;
use crate::models::{BatchError, BatchOutcome, ProcessedRecipe};
use tracing::{debug, warn};

/// Write `recipes` through `store` in chunks of `batch_size`
///
/// `batch_size` of zero is treated as one.
pub async fn write_batches<S>(
    store: &S,
    recipes: &[ProcessedRecipe],
    batch_size: usize,
) -> BatchOutcome
where
    S: RecipeStore + ?Sized,
{
    let mut outcome = BatchOutcome::default();

    for (batch_index, chunk) in recipes.chunks(batch_size.max(1)).enumerate() {
        match store.upsert_batch(chunk).await {
            Ok(()) => {
                outcome.success_count += chunk.len();
                debug!(batch_index, size = chunk.len(), "Batch written");
            }
            Err(e) => {
                warn!(batch_index, size = chunk.len(), error = %e, "Batch write failed");
                outcome.errors.push(BatchError {
                    batch_index,
                    error_message: e.to_string(),
                });
            }
        }
    }

    outcome
}
