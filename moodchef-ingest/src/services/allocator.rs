//! Balanced allocator
//!
//! Assigns each classified recipe to exactly one category while keeping every
//! category at or below the cap. Once a candidate is eligible, population
//! balance decides: the least-populated eligible category wins, and score only
//! breaks ties between equally populated categories.
//!
//! The pass is greedy and sequential. Each assignment updates the state before
//! the next recipe is considered, so later recipes see the new counts. Do not
//! parallelize this loop.

use super::classifier::{CandidateMatch, ScoredRecipe};
use crate::models::{Category, RawRecipe};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-category assigned counts plus the uniform cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationState {
    counts: BTreeMap<Category, usize>,
    cap: usize,
}

impl AllocationState {
    /// Empty state with every category at zero
    pub fn new(cap: usize) -> Self {
        Self::seeded(&BTreeMap::new(), cap)
    }

    /// State seeded from persisted counts; missing categories start at zero
    pub fn seeded(current: &BTreeMap<Category, usize>, cap: usize) -> Self {
        let counts = Category::ALL
            .iter()
            .map(|c| (*c, current.get(c).copied().unwrap_or(0)))
            .collect();
        Self { counts, cap }
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<Category, usize> {
        &self.counts
    }

    /// Strictly below the cap
    pub fn has_room(&self, category: Category) -> bool {
        self.count(category) < self.cap
    }

    fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }
}

/// Recipe committed to a category
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub recipe: RawRecipe,
    pub category: Category,
    pub score: u32,
}

/// Allocation result: assignments, drop count and the final state
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub assigned: Vec<Assignment>,
    /// Recipes whose eligible categories were all full
    pub dropped: usize,
    pub state: AllocationState,
}

impl Allocation {
    /// New assignments per category (categories with none are omitted)
    pub fn assigned_per_category(&self) -> BTreeMap<Category, usize> {
        let mut per_category = BTreeMap::new();
        for assignment in &self.assigned {
            *per_category.entry(assignment.category).or_insert(0) += 1;
        }
        per_category
    }
}

/// Choose the least-populated category with room, if any
///
/// `candidates` arrive best score first; the stable sort keeps that order for
/// categories with equal counts.
fn pick(candidates: &[CandidateMatch], state: &AllocationState) -> Option<CandidateMatch> {
    let mut eligible: Vec<CandidateMatch> = candidates
        .iter()
        .copied()
        .filter(|c| state.has_room(c.category))
        .collect();

    eligible.sort_by_key(|c| state.count(c.category));
    eligible.into_iter().next()
}

/// Allocate recipes in input order
pub fn allocate(scored: Vec<ScoredRecipe>, mut state: AllocationState) -> Allocation {
    let mut assigned = Vec::new();
    let mut dropped = 0usize;

    for ScoredRecipe { recipe, candidates } in scored {
        match pick(&candidates, &state) {
            Some(choice) => {
                state.record(choice.category);
                assigned.push(Assignment {
                    recipe,
                    category: choice.category,
                    score: choice.score,
                });
            }
            None => {
                dropped += 1;
                debug!(name = ?recipe.name, "All candidate categories full, dropping recipe");
            }
        }
    }

    Allocation {
        assigned,
        dropped,
        state,
    }
}
