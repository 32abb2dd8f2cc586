//! Processed recipe: the unit of persistence

use super::{Category, RawRecipe};
use serde::{Deserialize, Serialize};

/// Review status stored with each recipe
///
/// Rows written by the pipeline are always approved; other states (the
/// column defaults to `pending`) belong to the moderation side of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    Approved,
}

impl RecipeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeStatus::Approved => "approved",
        }
    }
}

/// Recipe bound to exactly one mood category, ready to upsert by title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes
    pub cooking_time: u32,
    pub emotion: Category,
    pub image_url: String,
    pub status: RecipeStatus,
    pub is_premium: bool,
}

impl ProcessedRecipe {
    /// Build the stored form of a raw record
    ///
    /// Callers only pass records that passed classification, so a name is present.
    pub fn from_raw(recipe: &RawRecipe, emotion: Category, is_premium: bool) -> Self {
        let cooking_time = recipe.total_minutes().unwrap_or(0);

        Self {
            title: recipe.title().unwrap_or_default().to_string(),
            description: derive_description(recipe, cooking_time),
            ingredients: recipe.ingredient_lines(),
            instructions: recipe.instruction_steps(),
            cooking_time,
            emotion,
            image_url: recipe.thumbnail_url.clone().unwrap_or_default(),
            status: RecipeStatus::Approved,
            is_premium,
        }
    }

    /// Stored emotions column: always a single-element list
    pub fn emotions(&self) -> [Category; 1] {
        [self.emotion]
    }
}

fn derive_description(recipe: &RawRecipe, cooking_time: u32) -> String {
    if let Some(description) = recipe
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        return description.to_string();
    }

    let cuisine = recipe
        .cuisine
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match (cuisine, cooking_time) {
        (Some(cuisine), 0) => format!("A {} dish.", cuisine),
        (Some(cuisine), minutes) => format!("A {} dish ready in {} minutes.", cuisine, minutes),
        (None, 0) => "A home-cooked dish.".to_string(),
        (None, minutes) => format!("A dish ready in {} minutes.", minutes),
    }
}
