//! Data structures and types for Chef's Choice
//!
//! Contains the shared models used across the application:
//! - **Recipes**: meal records with ingredients, instructions and video link
//! - **Categories**: the category listing used for browsing
//! - **Discovery**: keep/skip decisions taken on the discovery queue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of ingredient slots a recipe record carries
pub const MAX_INGREDIENTS: usize = 20;

// =============================================================================
// Recipe Models
// =============================================================================

/// One (ingredient, measure) slot of a recipe
///
/// Either side may be empty. A slot with a blank ingredient is unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }

    /// Whether this slot holds an actual ingredient
    pub fn is_used(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let measure = self.measure.trim();
        if measure.is_empty() {
            write!(f, "{}", self.name.trim())
        } else {
            write!(f, "{} {}", measure, self.name.trim())
        }
    }
}

/// A single dish record
///
/// Every field defaults to empty so that partially populated records
/// (category listings, older saved favorites) still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub thumbnail: String,
    pub instructions: String,
    pub video_url: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Ingredient slots that are actually in use, in order
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| i.is_used())
    }

    /// Video link, if present and not whitespace-only
    pub fn video(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn has_video(&self) -> bool {
        self.video().is_some()
    }

    /// Collapsed view of the instructions
    ///
    /// Returns the first `max_chars` characters followed by `...` when the
    /// instructions are longer than that.
    pub fn instructions_preview(&self, max_chars: usize) -> String {
        let text = self.instructions.trim();
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
            None => text.to_string(),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.area.is_empty(), self.category.is_empty()) {
            (true, true) => write!(f, "{}", self.name),
            (false, true) => write!(f, "{} ({})", self.name, self.area),
            (true, false) => write!(f, "{} ({})", self.name, self.category),
            (false, false) => write!(f, "{} ({} • {})", self.name, self.area, self.category),
        }
    }
}

// =============================================================================
// Category Models
// =============================================================================

/// Recipe category from the category listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub description: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Discovery Models
// =============================================================================

/// Decision taken on the current discovery card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Swipe right: save to favorites
    Keep,
    /// Swipe left: move on
    Skip,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Keep => write!(f, "keep"),
            Decision::Skip => write!(f, "skip"),
        }
    }
}
