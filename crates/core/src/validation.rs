//! Submit-time validation of a [`RecipeDraft`] — pure logic, no side
//! effects.
//!
//! Every rule is evaluated independently and all violations are returned
//! together; nothing short-circuits. Blank ingredient/step rows are
//! placeholders and produce no errors, but a partially filled row is a
//! candidate and reports its missing fields instead of being silently
//! dropped.

use crate::draft::RecipeDraft;
use crate::path::{FieldPath, IngredientField, ValidationErrors};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum ingredient quantity length.
pub const QUANTITY_MAX: usize = 20;
/// Maximum ingredient unit length.
pub const UNIT_MAX: usize = 20;
/// Maximum ingredient name length.
pub const INGREDIENT_NAME_MAX: usize = 50;
/// Maximum step instruction length.
pub const INSTRUCTION_MAX: usize = 500;
/// Minimum number of non-blank steps a recipe needs.
pub const MIN_STEPS: usize = 2;

/// Validate a draft for submission. Returns an empty map when the draft
/// is submission-valid.
pub fn validate_draft(draft: &RecipeDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validate_title(draft, &mut errors);
    validate_difficulty(draft, &mut errors);
    validate_cooking_time(draft, &mut errors);
    validate_categories(draft, &mut errors);
    validate_ingredients(draft, &mut errors);
    validate_steps(draft, &mut errors);

    errors
}

fn validate_title(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    if draft.title.trim().is_empty() {
        errors.insert(FieldPath::Title, "Title is required");
    } else if draft.title.chars().count() > TITLE_MAX {
        // The editing surface truncates input at the limit; this guards
        // drafts hydrated from elsewhere.
        errors.insert(
            FieldPath::Title,
            format!("Title must not exceed {TITLE_MAX} characters"),
        );
    }
}

fn validate_difficulty(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    // `Difficulty` is a closed enum, so membership is structural; only
    // presence can fail here.
    if draft.difficulty.is_none() {
        errors.insert(FieldPath::Difficulty, "Difficulty is required");
    }
}

fn validate_cooking_time(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    match draft.cooking_time_minutes {
        None => errors.insert(FieldPath::CookingTime, "Cooking time is required"),
        Some(minutes) if minutes < 1 => errors.insert(
            FieldPath::CookingTime,
            "Cooking time must be at least 1 minute",
        ),
        Some(_) => {}
    }
}

fn validate_categories(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    if draft.category_ids.is_empty() {
        errors.insert(FieldPath::Categories, "At least one category is required");
    }
}

fn validate_ingredients(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    let mut candidates = 0usize;

    for (idx, row) in draft.ingredients.iter().enumerate() {
        if !row.is_candidate() {
            continue;
        }
        candidates += 1;

        if row.quantity.trim().is_empty() {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Quantity),
                "Quantity is required",
            );
        } else if row.quantity.chars().count() > QUANTITY_MAX {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Quantity),
                format!("Quantity must not exceed {QUANTITY_MAX} characters"),
            );
        }

        if row.unit.trim().is_empty() {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Unit),
                "Unit is required",
            );
        } else if row.unit.chars().count() > UNIT_MAX {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Unit),
                format!("Unit must not exceed {UNIT_MAX} characters"),
            );
        }

        if row.name.trim().is_empty() {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Name),
                "Name is required",
            );
        } else if row.name.chars().count() > INGREDIENT_NAME_MAX {
            errors.insert(
                FieldPath::Ingredient(idx, IngredientField::Name),
                format!("Name must not exceed {INGREDIENT_NAME_MAX} characters"),
            );
        }
    }

    if candidates == 0 {
        errors.insert(
            FieldPath::Ingredient(0, IngredientField::Name),
            "At least one ingredient is required",
        );
    }
}

fn validate_steps(draft: &RecipeDraft, errors: &mut ValidationErrors) {
    let candidates: Vec<usize> = draft
        .steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.is_candidate())
        .map(|(idx, _)| idx)
        .collect();

    if candidates.len() < MIN_STEPS {
        errors.insert(FieldPath::Step(0), "At least two steps are required");
        return;
    }

    for idx in candidates {
        if draft.steps[idx].instruction.chars().count() > INSTRUCTION_MAX {
            errors.insert(
                FieldPath::Step(idx),
                format!("Instruction must not exceed {INSTRUCTION_MAX} characters"),
            );
        }
    }
}
