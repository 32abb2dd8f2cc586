//! Data models for the ingest pipeline

pub mod category;
pub mod processed_recipe;
pub mod raw_recipe;
pub mod run_summary;

pub use category::Category;
pub use processed_recipe::{ProcessedRecipe, RecipeStatus};
pub use raw_recipe::{
    Ingredient, IngredientComponent, IngredientSection, InstructionStep, Nutrition, RawRecipe,
    RecipeTag,
};
pub use run_summary::{BatchError, BatchOutcome, RunReport, RunSummary};
