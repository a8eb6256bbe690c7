//! Shared identifiers, read models, and filter/pagination types.
//!
//! The wire names follow the server's camelCase JSON
//! (`cookingTimeMinutes`, `categoryIds`, ...), so these types serialize
//! directly against the `/api/v1` payloads.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All server-side primary keys are 64-bit integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Recipe difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulty levels in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Wire representation (`EASY`, `MEDIUM`, `HARD`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            other => Err(CoreError::Parse(format!(
                "Difficulty must be EASY, MEDIUM, or HARD, got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// A recipe category as served by `/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A persisted ingredient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: DbId,
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

/// A persisted preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: DbId,
    pub instruction: String,
}

/// List-view projection of a recipe (no ingredients/steps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: DbId,
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: i32,
    pub categories: Vec<Category>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full recipe as served by `/recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: DbId,
    pub title: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: i32,
    pub categories: Vec<Category>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Server-reported pagination state for a recipe page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_recipes: u64,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// One fetched page of the recipe list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePage {
    pub recipes: Vec<RecipeSummary>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// The committed list filters. The staged (not yet debounced) search input
/// lives on the list controller, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub category_ids: BTreeSet<DbId>,
    pub difficulty: Option<Difficulty>,
    pub search: String,
}

impl FilterState {
    /// True when any filter deviates from the default (used by the filter
    /// bar's "clear all" affordance).
    pub fn has_active_filters(&self) -> bool {
        !self.category_ids.is_empty() || self.difficulty.is_some() || !self.search.is_empty()
    }
}
