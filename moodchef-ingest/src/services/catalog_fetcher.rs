//! Catalog fetcher
//!
//! Issues every query concurrently, waits for all of them to settle, then
//! merges and deduplicates by recipe name. A failed query contributes nothing
//! and never aborts the fetch.

use super::catalog_client::CatalogSource;
use crate::models::RawRecipe;
use futures::future::join_all;
use std::collections::HashMap;
use tracing::{info, warn};

/// Fetch all queries concurrently and return the merged, duplicate-free list
pub async fn fetch_catalog<C>(source: &C, queries: &[String]) -> Vec<RawRecipe>
where
    C: CatalogSource + ?Sized,
{
    let requests = queries.iter().map(|query| async move {
        match source.search(query).await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(query = %query, error = %e, "Catalog query failed (non-fatal)");
                Vec::new()
            }
        }
    });

    // join_all keeps query order, which keeps the merge deterministic
    let per_query: Vec<Vec<RawRecipe>> = join_all(requests).await;
    let merged_len: usize = per_query.iter().map(Vec::len).sum();

    let recipes = dedup_by_name(per_query.into_iter().flatten());

    info!(
        queries = queries.len(),
        merged = merged_len,
        distinct = recipes.len(),
        "Catalog fetch complete"
    );

    recipes
}

/// One entry per distinct name, carrying the last-seen record's fields
///
/// An entry keeps the position of the first occurrence of its name. Records
/// without a name have no identity and are passed through unchanged.
pub fn dedup_by_name(recipes: impl IntoIterator<Item = RawRecipe>) -> Vec<RawRecipe> {
    let mut out: Vec<RawRecipe> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for recipe in recipes {
        let Some(name) = recipe.title().map(str::to_string) else {
            out.push(recipe);
            continue;
        };

        match index_by_name.get(&name).copied() {
            Some(idx) => out[idx] = recipe,
            None => {
                index_by_name.insert(name, out.len());
                out.push(recipe);
            }
        }
    }

    out
}
