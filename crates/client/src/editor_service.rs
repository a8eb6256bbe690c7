//! Submit, load, and delete flows for the recipe form.
//!
//! Submission validates locally first; the network is touched only for
//! a clean draft. A re-entrancy flag collapses duplicate submits (a
//! double-clicked save issues exactly one request).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ladle_core::form::RecipeFormController;
use ladle_core::path::{FieldPath, ValidationErrors};
use ladle_core::types::{Category, DbId};

use crate::api::RecipeApi;
use crate::error::ApiError;

/// What the view should do after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(DbId),
    Updated,
    /// Local validation failed; focus the first erroring field.
    Invalid { first_field: FieldPath },
    /// The server rejected the payload; its errors are merged into the
    /// form. `first_field` is `None` when no error key mapped to a
    /// known field.
    RemoteInvalid { first_field: Option<FieldPath> },
    SessionExpired,
    /// The recipe being updated no longer exists.
    NotFound,
    Failed(String),
    /// A submit is already running; this attempt was dropped.
    InFlight,
}

/// Result of loading a recipe into the edit form.
#[derive(Debug)]
pub enum EditLoad {
    Loaded {
        form: RecipeFormController,
        categories: Vec<Category>,
    },
    NotFound,
    SessionExpired,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    SessionExpired,
    Failed(String),
}

pub struct RecipeEditorService<A> {
    api: Arc<A>,
    submitting: AtomicBool,
}

/// Clears the in-flight flag even if the submit future is dropped.
struct InFlightFlag<'a>(&'a AtomicBool);

impl Drop for InFlightFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<A: RecipeApi> RecipeEditorService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub async fn submit_create(&self, form: &mut RecipeFormController) -> SubmitOutcome {
        self.submit(form, None).await
    }

    pub async fn submit_update(&self, id: DbId, form: &mut RecipeFormController) -> SubmitOutcome {
        self.submit(form, Some(id)).await
    }

    async fn submit(&self, form: &mut RecipeFormController, target: Option<DbId>) -> SubmitOutcome {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::InFlight;
        }
        let _flag = InFlightFlag(&self.submitting);
        self.run_submit(form, target).await
    }

    async fn run_submit(
        &self,
        form: &mut RecipeFormController,
        target: Option<DbId>,
    ) -> SubmitOutcome {
        let errors = form.validate_form();
        if let Some(first_field) = errors.first() {
            form.apply_validation_errors(errors);
            return SubmitOutcome::Invalid { first_field };
        }

        let request = form.draft().to_request();
        let result = match target {
            None => self.api.create_recipe(&request).await.map(Some),
            Some(id) => self.api.update_recipe(id, &request).await.map(|()| None),
        };

        match result {
            Ok(Some(id)) => {
                form.mark_saved();
                SubmitOutcome::Created(id)
            }
            Ok(None) => {
                form.mark_saved();
                SubmitOutcome::Updated
            }
            Err(ApiError::Validation(map)) => {
                let remote =
                    ValidationErrors::from_wire(map.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                let first_field = form.merge_remote_errors(remote);
                tracing::debug!(?first_field, "server rejected recipe payload");
                SubmitOutcome::RemoteInvalid { first_field }
            }
            Err(ApiError::Unauthorized) => SubmitOutcome::SessionExpired,
            Err(ApiError::NotFound) => SubmitOutcome::NotFound,
            Err(other) => {
                tracing::warn!(%other, "recipe submit failed");
                SubmitOutcome::Failed(other.user_message().to_string())
            }
        }
    }

    /// Fetch the recipe and the category options together and hydrate a
    /// clean form from the result.
    pub async fn load_for_edit(&self, id: DbId) -> EditLoad {
        let (recipe, categories) = tokio::join!(self.api.get_recipe(id), self.api.list_categories());
        let detail = match recipe {
            Ok(detail) => detail,
            Err(ApiError::NotFound) => return EditLoad::NotFound,
            Err(ApiError::Unauthorized) => return EditLoad::SessionExpired,
            Err(other) => return EditLoad::Failed(other.user_message().to_string()),
        };
        let categories = match categories {
            Ok(categories) => categories,
            Err(other) => return EditLoad::Failed(other.user_message().to_string()),
        };
        EditLoad::Loaded {
            form: RecipeFormController::from_detail(&detail),
            categories,
        }
    }

    pub async fn delete(&self, id: DbId) -> DeleteOutcome {
        match self.api.delete_recipe(id).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(ApiError::NotFound) => DeleteOutcome::NotFound,
            Err(ApiError::Unauthorized) => DeleteOutcome::SessionExpired,
            Err(other) => DeleteOutcome::Failed(other.user_message().to_string()),
        }
    }
}
