//! Mood categories
//!
//! The taxonomy is a fixed, ordered set. Declaration order is the rule
//! iteration order and breaks classifier ties, so it must not be reshuffled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mood label a recipe can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Happy,
    Sad,
    Energetic,
    Calm,
    Tired,
    Anxious,
    Excited,
    Bored,
    Motivated,
    Angry,
    Confident,
    Stressed,
}

impl Category {
    /// Every category, in taxonomy order
    pub const ALL: [Category; 12] = [
        Category::Happy,
        Category::Sad,
        Category::Energetic,
        Category::Calm,
        Category::Tired,
        Category::Anxious,
        Category::Excited,
        Category::Bored,
        Category::Motivated,
        Category::Angry,
        Category::Confident,
        Category::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Happy => "Happy",
            Category::Sad => "Sad",
            Category::Energetic => "Energetic",
            Category::Calm => "Calm",
            Category::Tired => "Tired",
            Category::Anxious => "Anxious",
            Category::Excited => "Excited",
            Category::Bored => "Bored",
            Category::Motivated => "Motivated",
            Category::Angry => "Angry",
            Category::Confident => "Confident",
            Category::Stressed => "Stressed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive parse of a stored emotion label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown mood category: {}", s))
    }
}
