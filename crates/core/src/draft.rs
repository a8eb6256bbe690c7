//! The in-progress recipe draft and its submit payload.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Difficulty, RecipeDetail};

/// Number of blank ingredient rows a fresh draft starts with. Also the
/// lower bound the form controller enforces on removal.
pub const MIN_INGREDIENT_ROWS: usize = 1;

/// Number of blank step rows a fresh draft starts with. Also the lower
/// bound the form controller enforces on removal.
pub const MIN_STEP_ROWS: usize = 2;

// ---------------------------------------------------------------------------
// Row drafts
// ---------------------------------------------------------------------------

/// A single editable ingredient row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDraft {
    /// Present only when editing a persisted ingredient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl IngredientDraft {
    /// A row is a validation candidate once any of its fields holds text.
    /// Entirely blank rows are placeholders and are ignored.
    pub fn is_candidate(&self) -> bool {
        !self.quantity.is_empty() || !self.unit.is_empty() || !self.name.is_empty()
    }

    /// A row is fully filled when all three fields hold text. Only fully
    /// filled rows make it into the submit payload.
    pub fn is_filled(&self) -> bool {
        !self.quantity.is_empty() && !self.unit.is_empty() && !self.name.is_empty()
    }
}

/// A single editable preparation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub instruction: String,
}

impl StepDraft {
    /// A step counts once its trimmed instruction is non-blank.
    pub fn is_candidate(&self) -> bool {
        !self.instruction.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The mutable recipe being authored.
///
/// Created empty via [`RecipeDraft::initial`] (create flow) or from a
/// fetched recipe via [`RecipeDraft::from_detail`] (edit flow); mutated
/// only through the form controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub difficulty: Option<Difficulty>,
    pub cooking_time_minutes: Option<i32>,
    pub category_ids: BTreeSet<DbId>,
    pub ingredients: Vec<IngredientDraft>,
    pub steps: Vec<StepDraft>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::initial()
    }
}

impl RecipeDraft {
    /// The create-flow starting shape: empty fields, one blank ingredient
    /// row, two blank step rows.
    pub fn initial() -> Self {
        Self {
            title: String::new(),
            difficulty: None,
            cooking_time_minutes: None,
            category_ids: BTreeSet::new(),
            ingredients: vec![IngredientDraft::default(); MIN_INGREDIENT_ROWS],
            steps: vec![StepDraft::default(); MIN_STEP_ROWS],
        }
    }

    /// Build an edit-flow draft from a fetched recipe, padding the row
    /// lists back up to the placeholder minimums if the server returned
    /// fewer.
    pub fn from_detail(detail: &RecipeDetail) -> Self {
        let mut ingredients: Vec<IngredientDraft> = detail
            .ingredients
            .iter()
            .map(|ing| IngredientDraft {
                id: Some(ing.id),
                quantity: ing.quantity.clone(),
                unit: ing.unit.clone(),
                name: ing.name.clone(),
            })
            .collect();
        while ingredients.len() < MIN_INGREDIENT_ROWS {
            ingredients.push(IngredientDraft::default());
        }

        let mut steps: Vec<StepDraft> = detail
            .steps
            .iter()
            .map(|step| StepDraft {
                id: Some(step.id),
                instruction: step.instruction.clone(),
            })
            .collect();
        while steps.len() < MIN_STEP_ROWS {
            steps.push(StepDraft::default());
        }

        Self {
            title: detail.title.clone(),
            difficulty: Some(detail.difficulty),
            cooking_time_minutes: Some(detail.cooking_time_minutes),
            category_ids: detail.categories.iter().map(|c| c.id).collect(),
            ingredients,
            steps,
        }
    }

    /// Build the trimmed submit payload: title trimmed, only fully filled
    /// ingredient rows, only non-blank steps, every field trimmed.
    ///
    /// Callers must validate first; this never fails, it just drops rows
    /// that don't belong on the wire.
    pub fn to_request(&self) -> RecipeRequest {
        RecipeRequest {
            title: self.title.trim().to_string(),
            difficulty: self.difficulty,
            cooking_time_minutes: self.cooking_time_minutes,
            category_ids: self.category_ids.iter().copied().collect(),
            ingredients: self
                .ingredients
                .iter()
                .filter(|ing| ing.is_filled())
                .map(|ing| IngredientRequest {
                    quantity: ing.quantity.trim().to_string(),
                    unit: ing.unit.trim().to_string(),
                    name: ing.name.trim().to_string(),
                })
                .collect(),
            steps: self
                .steps
                .iter()
                .filter(|step| step.is_candidate())
                .map(|step| StepRequest {
                    instruction: step.instruction.trim().to_string(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Submit payload
// ---------------------------------------------------------------------------

/// The create/update request body for `POST /recipes` and
/// `PUT /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub title: String,
    pub difficulty: Option<Difficulty>,
    pub cooking_time_minutes: Option<i32>,
    pub category_ids: Vec<DbId>,
    pub ingredients: Vec<IngredientRequest>,
    pub steps: Vec<StepRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRequest {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRequest {
    pub instruction: String,
}
