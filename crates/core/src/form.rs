//! The recipe form controller: owns the draft, dirty flag, touched set,
//! and the latest validation snapshot.
//!
//! Field updates never validate synchronously — errors are recomputed only
//! when a submit is attempted (via [`RecipeFormController::validate_form`]
//! and [`RecipeFormController::apply_validation_errors`]), so typing never
//! produces an error storm. Error *visibility* is gated per field: an
//! error is surfaced only once its field was blurred or a submit was
//! attempted.

use std::collections::BTreeSet;

use crate::draft::{
    IngredientDraft, RecipeDraft, StepDraft, MIN_INGREDIENT_ROWS, MIN_STEP_ROWS,
};
use crate::path::{FieldPath, IngredientField, TouchedState, ValidationErrors};
use crate::types::{DbId, Difficulty, RecipeDetail};
use crate::validation::validate_draft;

#[derive(Debug, Clone, Default)]
pub struct RecipeFormController {
    draft: RecipeDraft,
    errors: ValidationErrors,
    touched: TouchedState,
    dirty: bool,
    submit_attempted: bool,
}

impl RecipeFormController {
    /// Create-flow controller with the initial empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit-flow controller hydrated from a fetched recipe. Loading an
    /// existing recipe is not a user edit, so the form starts clean.
    pub fn from_detail(detail: &RecipeDetail) -> Self {
        Self {
            draft: RecipeDraft::from_detail(detail),
            ..Self::default()
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_touched(&self, path: FieldPath) -> bool {
        self.touched.is_touched(path)
    }

    /// The error to display for a field, honoring the visibility gate:
    /// never before the field is touched or a submit was attempted.
    pub fn visible_error(&self, path: FieldPath) -> Option<&str> {
        if self.submit_attempted || self.touched.is_touched(path) {
            self.errors.get(path)
        } else {
            None
        }
    }

    // -- scalar fields ------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.dirty = true;
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.draft.difficulty = difficulty;
        self.dirty = true;
    }

    pub fn set_cooking_time(&mut self, minutes: Option<i32>) {
        self.draft.cooking_time_minutes = minutes;
        self.dirty = true;
    }

    pub fn set_categories(&mut self, category_ids: BTreeSet<DbId>) {
        self.draft.category_ids = category_ids;
        self.dirty = true;
    }

    /// Add the category if absent, remove it if present (the category
    /// chips in the form are toggles).
    pub fn toggle_category(&mut self, category_id: DbId) {
        if !self.draft.category_ids.remove(&category_id) {
            self.draft.category_ids.insert(category_id);
        }
        self.dirty = true;
    }

    /// Mark a field as having lost focus. Does not recompute errors; the
    /// visibility gate in [`visible_error`](Self::visible_error) consults
    /// the latest snapshot.
    pub fn blur(&mut self, path: FieldPath) {
        self.touched.mark(path);
    }

    // -- ingredient rows ----------------------------------------------------

    pub fn add_ingredient(&mut self) {
        self.draft.ingredients.push(IngredientDraft::default());
        self.dirty = true;
    }

    /// Remove an ingredient row. No-op while only the placeholder minimum
    /// remains, or when the index is out of bounds.
    pub fn remove_ingredient(&mut self, index: usize) {
        if self.draft.ingredients.len() <= MIN_INGREDIENT_ROWS
            || index >= self.draft.ingredients.len()
        {
            return;
        }
        self.draft.ingredients.remove(index);
        self.dirty = true;
    }

    pub fn update_ingredient(&mut self, index: usize, field: IngredientField, value: &str) {
        let Some(row) = self.draft.ingredients.get_mut(index) else {
            return;
        };
        match field {
            IngredientField::Quantity => row.quantity = value.to_string(),
            IngredientField::Unit => row.unit = value.to_string(),
            IngredientField::Name => row.name = value.to_string(),
        }
        self.dirty = true;
    }

    pub fn ingredient_blur(&mut self, index: usize, field: IngredientField) {
        self.touched.mark(FieldPath::Ingredient(index, field));
    }

    // -- step rows ----------------------------------------------------------

    pub fn add_step(&mut self) {
        self.draft.steps.push(StepDraft::default());
        self.dirty = true;
    }

    /// Remove a step row. No-op while only the two placeholder rows
    /// remain, or when the index is out of bounds.
    pub fn remove_step(&mut self, index: usize) {
        if self.draft.steps.len() <= MIN_STEP_ROWS || index >= self.draft.steps.len() {
            return;
        }
        self.draft.steps.remove(index);
        self.dirty = true;
    }

    pub fn update_step(&mut self, index: usize, instruction: &str) {
        let Some(step) = self.draft.steps.get_mut(index) else {
            return;
        };
        step.instruction = instruction.to_string();
        self.dirty = true;
    }

    pub fn step_blur(&mut self, index: usize) {
        self.touched.mark(FieldPath::Step(index));
    }

    /// Swap a step with its predecessor. No-op at index 0. Touched/error
    /// state is untouched; errors re-attach at the next validation pass
    /// because they are recomputed from the reordered array.
    pub fn move_step_up(&mut self, index: usize) {
        if index == 0 || index >= self.draft.steps.len() {
            return;
        }
        self.draft.steps.swap(index - 1, index);
        self.dirty = true;
    }

    /// Swap a step with its successor. No-op at the last index.
    pub fn move_step_down(&mut self, index: usize) {
        if index + 1 >= self.draft.steps.len() {
            return;
        }
        self.draft.steps.swap(index, index + 1);
        self.dirty = true;
    }

    // -- validation / lifecycle ---------------------------------------------

    /// Run the validation engine over the current draft without mutating
    /// controller state. The submit flow decides what to do with the
    /// result.
    pub fn validate_form(&self) -> ValidationErrors {
        validate_draft(&self.draft)
    }

    /// Store a validation result from a submit attempt. All errors become
    /// visible (submit attempted) and the first erroring field, in form
    /// order, is returned so the view can focus it.
    pub fn apply_validation_errors(&mut self, errors: ValidationErrors) -> Option<FieldPath> {
        self.submit_attempted = true;
        let first = errors.first();
        self.errors = errors;
        first
    }

    /// Merge server-side validation errors into the current snapshot so
    /// the view renders them exactly like local ones.
    pub fn merge_remote_errors(&mut self, errors: ValidationErrors) -> Option<FieldPath> {
        self.submit_attempted = true;
        self.errors.merge(errors);
        self.errors.first()
    }

    /// Called after a successful save: the draft now matches the
    /// persisted entity.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Restore the create-flow defaults.
    pub fn reset_form(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Ingredient, Step};

    fn sample_detail() -> RecipeDetail {
        RecipeDetail {
            id: 3,
            title: "Stew".into(),
            difficulty: Difficulty::Hard,
            cooking_time_minutes: 90,
            categories: vec![Category {
                id: 2,
                name: "Dinner".into(),
            }],
            ingredients: vec![Ingredient {
                id: 10,
                quantity: "2".into(),
                unit: "lbs".into(),
                name: "beef".into(),
            }],
            steps: vec![
                Step {
                    id: 20,
                    instruction: "Brown the beef".into(),
                },
                Step {
                    id: 21,
                    instruction: "Simmer".into(),
                },
            ],
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn updates_mark_dirty() {
        let mut form = RecipeFormController::new();
        assert!(!form.is_dirty());
        form.set_title("Tea");
        assert!(form.is_dirty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = RecipeFormController::new();
        form.set_title("Tea");
        form.blur(FieldPath::Title);
        form.apply_validation_errors(form.validate_form());
        form.reset_form();
        assert!(!form.is_dirty());
        assert!(form.errors().is_empty());
        assert!(!form.is_touched(FieldPath::Title));
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn hydrating_does_not_mark_dirty() {
        let form = RecipeFormController::from_detail(&sample_detail());
        assert!(!form.is_dirty());
        assert_eq!(form.draft().title, "Stew");
    }

    #[test]
    fn remove_ingredient_floor_is_one_row() {
        let mut form = RecipeFormController::new();
        assert_eq!(form.draft().ingredients.len(), 1);
        form.remove_ingredient(0);
        assert_eq!(form.draft().ingredients.len(), 1);
        assert!(!form.is_dirty());

        form.add_ingredient();
        form.remove_ingredient(1);
        assert_eq!(form.draft().ingredients.len(), 1);
    }

    #[test]
    fn remove_step_floor_is_two_rows() {
        let mut form = RecipeFormController::new();
        assert_eq!(form.draft().steps.len(), 2);
        form.remove_step(0);
        assert_eq!(form.draft().steps.len(), 2);

        form.add_step();
        form.remove_step(2);
        assert_eq!(form.draft().steps.len(), 2);
    }

    #[test]
    fn out_of_bounds_row_operations_are_noops() {
        let mut form = RecipeFormController::new();
        form.add_ingredient();
        form.remove_ingredient(5);
        assert_eq!(form.draft().ingredients.len(), 2);
        form.update_ingredient(9, IngredientField::Name, "ghost");
        form.update_step(9, "ghost");
        assert!(form.draft().ingredients.iter().all(|i| i.name.is_empty()));
    }

    #[test]
    fn move_step_boundaries_are_noops() {
        let mut form = RecipeFormController::new();
        form.update_step(0, "A");
        form.update_step(1, "B");

        form.move_step_up(0);
        assert_eq!(form.draft().steps[0].instruction, "A");

        form.move_step_down(1);
        assert_eq!(form.draft().steps[1].instruction, "B");
    }

    #[test]
    fn move_step_up_swaps_adjacent() {
        let mut form = RecipeFormController::new();
        form.update_step(0, "A");
        form.update_step(1, "B");
        form.move_step_up(1);
        assert_eq!(form.draft().steps[0].instruction, "B");
        assert_eq!(form.draft().steps[1].instruction, "A");
    }

    #[test]
    fn move_step_down_swaps_adjacent() {
        let mut form = RecipeFormController::new();
        form.update_step(0, "A");
        form.update_step(1, "B");
        form.move_step_down(0);
        assert_eq!(form.draft().steps[0].instruction, "B");
        assert_eq!(form.draft().steps[1].instruction, "A");
    }

    #[test]
    fn toggle_category_adds_then_removes() {
        let mut form = RecipeFormController::new();
        form.toggle_category(7);
        assert!(form.draft().category_ids.contains(&7));
        form.toggle_category(7);
        assert!(!form.draft().category_ids.contains(&7));
    }

    #[test]
    fn errors_hidden_until_touched_or_submit() {
        let mut form = RecipeFormController::new();
        let errors = form.validate_form();
        assert!(errors.contains(FieldPath::Title));

        // Snapshot stored outside a submit attempt stays gated.
        form.errors = errors;
        assert_eq!(form.visible_error(FieldPath::Title), None);

        form.blur(FieldPath::Title);
        assert_eq!(form.visible_error(FieldPath::Title), Some("Title is required"));
        // Other untouched fields stay hidden.
        assert_eq!(form.visible_error(FieldPath::Difficulty), None);
    }

    #[test]
    fn submit_attempt_reveals_all_errors_and_focuses_first() {
        let mut form = RecipeFormController::new();
        let errors = form.validate_form();
        let first = form.apply_validation_errors(errors);
        assert_eq!(first, Some(FieldPath::Title));
        assert_eq!(form.visible_error(FieldPath::Difficulty), Some("Difficulty is required"));
    }

    #[test]
    fn remote_errors_merge_into_snapshot() {
        let mut form = RecipeFormController::new();
        form.apply_validation_errors(ValidationErrors::new());

        let remote = ValidationErrors::from_wire([("categoryIds", "Category does not exist")]);
        let first = form.merge_remote_errors(remote);
        assert_eq!(first, Some(FieldPath::Categories));
        assert_eq!(
            form.visible_error(FieldPath::Categories),
            Some("Category does not exist")
        );
    }

    #[test]
    fn create_flow_end_to_end() {
        let mut form = RecipeFormController::new();
        form.set_title("Tea");
        form.set_difficulty(Some(Difficulty::Easy));
        form.set_cooking_time(Some(5));
        form.toggle_category(7);
        form.update_ingredient(0, IngredientField::Quantity, "1");
        form.update_ingredient(0, IngredientField::Unit, "cup");
        form.update_ingredient(0, IngredientField::Name, "water");
        form.update_step(0, "Boil water");
        form.update_step(1, "Pour over leaves");

        assert!(form.validate_form().is_empty());

        let request = form.draft().to_request();
        assert_eq!(request.title, "Tea");
        assert_eq!(request.category_ids, vec![7]);
        assert_eq!(request.ingredients.len(), 1);
        assert_eq!(request.steps.len(), 2);

        form.mark_saved();
        assert!(!form.is_dirty());
    }
}
