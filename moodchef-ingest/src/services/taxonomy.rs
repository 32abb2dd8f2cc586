//! Mood taxonomy rule table
//!
//! Each category has one declarative rule row: a list of predicates (the rule
//! matches when any of them holds) and a weighted list of relevant tags used
//! for scoring. Row order follows [`Category::ALL`] and is the tie-break order
//! for equal scores.

use crate::models::{Category, RawRecipe};

/// Points per matching tag
pub const TAG_WEIGHT: u32 = 3;
/// Recipes at or under this total time earn a bonus point
pub const QUICK_RECIPE_MINUTES: u32 = 30;
/// Recipes with at most this many ingredients earn a bonus point
pub const SHORT_INGREDIENT_LIST: usize = 8;

/// Single condition over a raw recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Any record tag appears in the rule's tag list
    HasRuleTag,
    /// Name or description contains any keyword (case-insensitive)
    Mentions(&'static [&'static str]),
    /// Total time known and at most this many minutes
    TotalMinutesAtMost(u32),
    /// Protein known and at least this many grams
    ProteinAtLeast(f64),
    /// Difficulty equals one of these (case-insensitive)
    DifficultyIs(&'static [&'static str]),
    /// Cuisine equals one of these (case-insensitive)
    CuisineIs(&'static [&'static str]),
}

/// Rule row for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub category: Category,
    /// Rule matches when any predicate holds
    pub predicates: &'static [Predicate],
    /// Relevant tags (normalized form)
    pub tags: &'static [&'static str],
    pub tag_weight: u32,
}

impl Predicate {
    fn holds(&self, rule: &Rule, recipe: &RawRecipe, tags: &[String]) -> bool {
        match *self {
            Predicate::HasRuleTag => tags.iter().any(|t| rule.tags.contains(&t.as_str())),
            Predicate::Mentions(keywords) => {
                let text = recipe.searchable_text();
                keywords.iter().any(|k| text.contains(k))
            }
            Predicate::TotalMinutesAtMost(limit) => {
                recipe.total_minutes().is_some_and(|m| m <= limit)
            }
            Predicate::ProteinAtLeast(grams) => recipe.protein_grams().is_some_and(|p| p >= grams),
            Predicate::DifficultyIs(values) => matches_any(recipe.difficulty.as_deref(), values),
            Predicate::CuisineIs(values) => matches_any(recipe.cuisine.as_deref(), values),
        }
    }
}

fn matches_any(value: Option<&str>, candidates: &[&str]) -> bool {
    value
        .map(str::trim)
        .is_some_and(|v| candidates.iter().any(|c| c.eq_ignore_ascii_case(v)))
}

impl Rule {
    /// Evaluate the predicate list against a recipe and its normalized tags
    pub fn matches(&self, recipe: &RawRecipe, tags: &[String]) -> bool {
        self.predicates.iter().any(|p| p.holds(self, recipe, tags))
    }

    /// Additive score: weighted tag hits plus quick-time and short-list bonuses
    pub fn score(&self, recipe: &RawRecipe, tags: &[String]) -> u32 {
        let tag_hits = tags
            .iter()
            .filter(|t| self.tags.contains(&t.as_str()))
            .count() as u32;

        let mut score = tag_hits * self.tag_weight;
        if recipe
            .total_minutes()
            .is_some_and(|m| m <= QUICK_RECIPE_MINUTES)
        {
            score += 1;
        }
        if recipe.ingredient_count() <= SHORT_INGREDIENT_LIST {
            score += 1;
        }
        score
    }
}

/// The mood taxonomy, one row per category in [`Category::ALL`] order
pub const TAXONOMY: &[Rule] = &[
    Rule {
        category: Category::Happy,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["cake", "cookie", "cupcake", "sprinkles"]),
        ],
        tags: &["dessert", "sweet", "baking", "celebration", "birthday", "cookies"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Sad,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["soup", "chocolate", "mac and cheese"]),
        ],
        tags: &["comfort_food", "soup", "chocolate", "stew", "mac_and_cheese"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Energetic,
        predicates: &[Predicate::HasRuleTag, Predicate::ProteinAtLeast(25.0)],
        tags: &["high_protein", "breakfast", "smoothie", "energy"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Calm,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["herbal", "chamomile", "salad"]),
        ],
        tags: &["tea", "healthy", "salad", "vegetarian", "mediterranean"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Tired,
        predicates: &[Predicate::HasRuleTag, Predicate::TotalMinutesAtMost(20)],
        tags: &["easy", "one_pot_or_pan", "under_30_minutes", "5_ingredients_or_less"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Anxious,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["oatmeal", "porridge", "warm"]),
        ],
        tags: &["comfort_food", "oatmeal", "warm", "baked", "bread"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Excited,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["taco", "party", "nachos"]),
        ],
        tags: &["party", "game_day", "bbq", "fusion", "appetizers"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Bored,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::CuisineIs(&[
                "thai",
                "korean",
                "indian",
                "ethiopian",
                "peruvian",
                "vietnamese",
            ]),
        ],
        tags: &["fusion", "international", "street_food"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Motivated,
        predicates: &[Predicate::HasRuleTag, Predicate::ProteinAtLeast(20.0)],
        tags: &["healthy", "meal_prep", "high_protein", "low_carb"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Angry,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::Mentions(&["spicy", "chili", "jalapeño", "jalapeno", "sriracha"]),
        ],
        tags: &["spicy", "hot", "bbq", "chili"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Confident,
        predicates: &[
            Predicate::HasRuleTag,
            Predicate::DifficultyIs(&["hard", "advanced", "difficult"]),
        ],
        tags: &["dinner_party", "gourmet", "steak", "seafood"],
        tag_weight: TAG_WEIGHT,
    },
    Rule {
        category: Category::Stressed,
        predicates: &[Predicate::HasRuleTag, Predicate::TotalMinutesAtMost(15)],
        tags: &["quick", "easy", "5_ingredients_or_less", "snacks"],
        tag_weight: TAG_WEIGHT,
    },
];
