//! Recipe finalizer
//!
//! Turns allocator assignments into persisted form and draws the premium flag.
//! The flag is an independent Bernoulli draw per recipe from the caller's RNG,
//! so tests can pass a seeded or mock generator.

use super::allocator::Assignment;
use crate::models::ProcessedRecipe;
use rand::Rng;

/// Build processed recipes, flagging each premium with `premium_probability`
///
/// Out-of-range probabilities are clamped; a non-finite one flags nothing.
pub fn finalize<R: Rng + ?Sized>(
    assigned: Vec<Assignment>,
    premium_probability: f64,
    rng: &mut R,
) -> Vec<ProcessedRecipe> {
    let probability = if premium_probability.is_finite() {
        premium_probability.clamp(0.0, 1.0)
    } else {
        0.0
    };

    assigned
        .into_iter()
        .map(|assignment| {
            let is_premium = rng.gen_bool(probability);
            ProcessedRecipe::from_raw(&assignment.recipe, assignment.category, is_premium)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RawRecipe};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assignments(n: usize) -> Vec<Assignment> {
        (0..n)
            .map(|i| Assignment {
                recipe: RawRecipe {
                    name: Some(format!("Recipe {}", i)),
                    ..Default::default()
                },
                category: Category::Calm,
                score: 1,
            })
            .collect()
    }

    #[test]
    fn test_probability_bounds() {
        let mut rng = StepRng::new(0, 1);
        let none = finalize(assignments(10), 0.0, &mut rng);
        assert!(none.iter().all(|r| !r.is_premium));

        let all = finalize(assignments(10), 1.0, &mut rng);
        assert!(all.iter().all(|r| r.is_premium));
    }

    #[test]
    fn test_non_finite_probability_flags_nothing() {
        let mut rng = StepRng::new(0, 0);
        for probability in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let processed = finalize(assignments(5), probability, &mut rng);
            assert_eq!(processed.len(), 5);
            assert!(processed.iter().all(|r| !r.is_premium));
        }

        let clamped = finalize(assignments(5), 7.5, &mut rng);
        assert!(clamped.iter().all(|r| r.is_premium));
    }

    #[test]
    fn test_mock_rng_controls_flag() {
        // A zero draw is below any positive threshold
        let mut low = StepRng::new(0, 0);
        assert!(finalize(assignments(3), 0.3, &mut low).iter().all(|r| r.is_premium));

        // A maximal draw is above any threshold below one
        let mut high = StepRng::new(u64::MAX, 0);
        assert!(finalize(assignments(3), 0.3, &mut high).iter().all(|r| !r.is_premium));
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_plausible() {
        let first = finalize(assignments(1000), 0.3, &mut StdRng::seed_from_u64(7));
        let second = finalize(assignments(1000), 0.3, &mut StdRng::seed_from_u64(7));

        let flags: Vec<bool> = first.iter().map(|r| r.is_premium).collect();
        let again: Vec<bool> = second.iter().map(|r| r.is_premium).collect();
        assert_eq!(flags, again);

        let premium = flags.iter().filter(|f| **f).count();
        assert!((200..400).contains(&premium), "premium count {} far from 30%", premium);
    }

    #[test]
    fn test_keeps_assignment_order_and_category() {
        let processed = finalize(assignments(3), 0.5, &mut StdRng::seed_from_u64(1));
        let titles: Vec<&str> = processed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Recipe 0", "Recipe 1", "Recipe 2"]);
        assert!(processed.iter().all(|r| r.emotion == Category::Calm));
    }
}
