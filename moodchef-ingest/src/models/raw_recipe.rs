//! Recipe records as delivered by the external catalog
//!
//! The catalog sends `null` for many absent fields, so list fields go through
//! [`null_as_default`] and scalars are `Option`s. Whether a record is usable is
//! decided by the classifier, not at deserialization time.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Catalog recipe record
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<RecipeTag>,
    /// Ingredient sections (e.g. "For the sauce")
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<IngredientSection>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<InstructionStep>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,
    #[serde(default)]
    pub total_time_minutes: Option<u32>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RecipeTag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IngredientSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<IngredientComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IngredientComponent {
    /// Display line, e.g. "2 cups flour"
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub ingredient: Option<Ingredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstructionStep {
    #[serde(default)]
    pub display_text: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Nutrition {
    /// Protein in grams
    #[serde(default)]
    pub protein: Option<f64>,
}

/// Lowercase and fold spaces/hyphens so "Comfort Food" matches "comfort_food"
pub fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RawRecipe {
    /// Trimmed name, if present and non-blank
    pub fn title(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    /// A record is usable only with a name, ingredient sections and instructions
    pub fn is_complete(&self) -> bool {
        self.title().is_some() && !self.sections.is_empty() && !self.instructions.is_empty()
    }

    /// Normalized tag names, duplicates removed, source order kept
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let name = normalize_tag(&tag.name);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Total time, falling back to prep + cook when the total is absent or zero
    pub fn total_minutes(&self) -> Option<u32> {
        match self.total_time_minutes {
            Some(total) if total > 0 => Some(total),
            _ => match (self.prep_time_minutes, self.cook_time_minutes) {
                (None, None) => None,
                (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
            },
        }
    }

    pub fn protein_grams(&self) -> Option<f64> {
        self.nutrition.as_ref().and_then(|n| n.protein)
    }

    /// Ingredient lines flattened across sections, in order
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|section| section.components.iter())
            .filter_map(|component| {
                non_blank(&component.raw_text)
                    .or_else(|| {
                        component
                            .ingredient
                            .as_ref()
                            .and_then(|ingredient| non_blank(&ingredient.name))
                    })
                    .map(str::to_string)
            })
            .collect()
    }

    /// Number of ingredient components across all sections
    pub fn ingredient_count(&self) -> usize {
        self.sections.iter().map(|s| s.components.len()).sum()
    }

    /// Instruction texts ordered by position (source order when equal or missing)
    pub fn instruction_steps(&self) -> Vec<String> {
        let mut steps: Vec<&InstructionStep> = self.instructions.iter().collect();
        steps.sort_by_key(|step| step.position.unwrap_or(u32::MAX));
        steps
            .into_iter()
            .filter_map(|step| non_blank(&step.display_text).map(str::to_string))
            .collect()
    }

    /// Lowercased name and description, for keyword matching
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {}",
            self.name.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}
