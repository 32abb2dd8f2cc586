//! Mood classifier
//!
//! Pure evaluation of each recipe against the rule table. Incomplete records
//! (no name, no ingredient sections or no instructions) produce no candidates
//! and are therefore dropped before allocation.

use super::taxonomy::Rule;
use crate::models::{Category, RawRecipe};
use tracing::debug;

/// Scored, not-yet-committed association between a recipe and a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMatch {
    pub category: Category,
    pub score: u32,
}

/// A recipe with its candidates, best score first
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub recipe: RawRecipe,
    pub candidates: Vec<CandidateMatch>,
}

/// Evaluate one recipe against every rule
///
/// Candidates are sorted by descending score. The sort is stable, so equal
/// scores keep rule-table order.
pub fn classify(recipe: &RawRecipe, rules: &[Rule]) -> Vec<CandidateMatch> {
    if !recipe.is_complete() {
        return Vec::new();
    }

    let tags = recipe.tag_names();
    let mut candidates: Vec<CandidateMatch> = rules
        .iter()
        .filter(|rule| rule.matches(recipe, &tags))
        .map(|rule| CandidateMatch {
            category: rule.category,
            score: rule.score(recipe, &tags),
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Classify a batch, keeping only recipes with at least one candidate
///
/// Input order is preserved; the allocator depends on it.
pub fn classify_all(recipes: Vec<RawRecipe>, rules: &[Rule]) -> Vec<ScoredRecipe> {
    let total = recipes.len();
    let mut incomplete = 0usize;
    let mut unmatched = 0usize;

    let scored: Vec<ScoredRecipe> = recipes
        .into_iter()
        .filter_map(|recipe| {
            if !recipe.is_complete() {
                incomplete += 1;
                debug!(name = ?recipe.name, "Skipping incomplete recipe");
                return None;
            }
            let candidates = classify(&recipe, rules);
            if candidates.is_empty() {
                unmatched += 1;
                debug!(name = ?recipe.name, "Recipe matched no mood rule");
                return None;
            }
            Some(ScoredRecipe { recipe, candidates })
        })
        .collect();

    debug!(
        total,
        classified = scored.len(),
        incomplete,
        unmatched,
        "Classification complete"
    );

    scored
}
