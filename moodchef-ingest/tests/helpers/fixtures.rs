//! Raw recipe fixtures
//!
//! Neutral names, one ingredient, one step and a 45 minute total, so the only
//! rule a fixture matches is the one its tag selects.

use moodchef_ingest::models::{
    Ingredient, IngredientComponent, IngredientSection, InstructionStep, RawRecipe, RecipeTag,
};

/// Complete recipe carrying a single tag
pub fn tagged_recipe(name: &str, tag: &str) -> RawRecipe {
    RawRecipe {
        name: Some(name.to_string()),
        description: Some(String::new()),
        tags: vec![RecipeTag {
            name: tag.to_string(),
        }],
        sections: vec![IngredientSection {
            components: vec![IngredientComponent {
                raw_text: Some("1 cup rice".to_string()),
                ingredient: Some(Ingredient {
                    name: Some("rice".to_string()),
                }),
            }],
        }],
        instructions: vec![InstructionStep {
            display_text: Some("Cook the rice.".to_string()),
            position: Some(1),
        }],
        total_time_minutes: Some(45),
        ..Default::default()
    }
}

/// `count` recipes named "`prefix` N" with the same tag
pub fn tagged_recipes(prefix: &str, tag: &str, count: usize) -> Vec<RawRecipe> {
    (1..=count)
        .map(|i| tagged_recipe(&format!("{} {}", prefix, i), tag))
        .collect()
}
