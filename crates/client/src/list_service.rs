//! Async driver for the recipe list controller.
//!
//! The controller emits [`FetchRequest`]s; this service executes them
//! against the API and feeds the outcome back. Debounce is handled with
//! a cancellable timer task: every keystroke cancels the previous timer,
//! so only the final pending commit fires. Stale responses are rejected
//! by the controller's generation check and only logged here.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use ladle_core::list::{FetchRequest, RecipeListController};
use ladle_core::types::{Category, DbId, Difficulty, FilterState, Pagination, RecipeSummary};

use crate::api::RecipeApi;
use crate::config::ClientConfig;

/// Shown for any failed list fetch; the accumulated recipes stay on
/// screen next to it.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recipes. Please try again.";

/// A point-in-time copy of the list state for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub recipes: Vec<RecipeSummary>,
    pub filters: FilterState,
    pub search_input: String,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_active_filters: bool,
}

pub struct RecipeListService<A> {
    api: Arc<A>,
    state: Arc<Mutex<RecipeListController>>,
    categories: Mutex<Vec<Category>>,
    /// Token of the pending debounce timer, if any. Guarded by a sync
    /// mutex (never held across an await) so `Drop` can reach it.
    debounce: std::sync::Mutex<Option<CancellationToken>>,
}

impl<A> Drop for RecipeListService<A> {
    fn drop(&mut self) {
        let pending = match self.debounce.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(token) = pending {
            token.cancel();
        }
    }
}

impl<A: RecipeApi + 'static> RecipeListService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(RecipeListController::new())),
            categories: Mutex::new(Vec::new()),
            debounce: std::sync::Mutex::new(None),
        }
    }

    pub fn with_config(api: Arc<A>, config: &ClientConfig) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(RecipeListController::with_config(
                config.page_size,
                config.search_debounce,
            ))),
            categories: Mutex::new(Vec::new()),
            debounce: std::sync::Mutex::new(None),
        }
    }

    /// Mount-time work: load the category filter options and the first
    /// unfiltered page. A category load failure is non-fatal; the list
    /// still renders without the filter options.
    pub async fn start(&self) {
        match self.api.list_categories().await {
            Ok(categories) => *self.categories.lock().await = categories,
            Err(error) => tracing::warn!(%error, "failed to load categories"),
        }
        let request = self.state.lock().await.initial_fetch();
        Self::execute(&self.api, &self.state, request).await;
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let list = self.state.lock().await;
        ListSnapshot {
            recipes: list.recipes().to_vec(),
            filters: list.filters().clone(),
            search_input: list.search_input().to_string(),
            pagination: list.pagination().cloned(),
            loading: list.is_loading(),
            error: list.error().map(String::from),
            has_active_filters: list.has_active_filters(),
        }
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.lock().await.clone()
    }

    /// Stage a keystroke and (re)arm the debounce timer. The previous
    /// timer is cancelled, so rapid typing commits only the final value.
    /// Dropping the service cancels a still-pending timer too.
    pub async fn search(&self, text: impl Into<String>) {
        let delay = self.state.lock().await.set_search(text);

        let token = CancellationToken::new();
        if let Some(previous) = self.arm_debounce(token.clone()) {
            previous.cancel();
        }

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let request = state.lock().await.commit_search();
                    if let Some(request) = request {
                        Self::execute(&api, &state, request).await;
                    }
                }
            }
        });
    }

    pub async fn set_category_filter(&self, category_ids: std::collections::BTreeSet<DbId>) {
        let request = self.state.lock().await.set_category_filter(category_ids);
        self.run_if_issued(request).await;
    }

    pub async fn set_difficulty_filter(&self, difficulty: Option<Difficulty>) {
        let request = self.state.lock().await.set_difficulty_filter(difficulty);
        self.run_if_issued(request).await;
    }

    pub async fn clear_all_filters(&self) {
        let request = self.state.lock().await.clear_all_filters();
        self.run_if_issued(request).await;
    }

    pub async fn load_more(&self) {
        let request = self.state.lock().await.load_more();
        self.run_if_issued(request).await;
    }

    pub async fn retry(&self) {
        let request = self.state.lock().await.retry();
        Self::execute(&self.api, &self.state, request).await;
    }

    fn arm_debounce(&self, token: CancellationToken) -> Option<CancellationToken> {
        let mut slot = match self.debounce.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.replace(token)
    }

    async fn run_if_issued(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            Self::execute(&self.api, &self.state, request).await;
        }
    }

    async fn execute(api: &A, state: &Mutex<RecipeListController>, request: FetchRequest) {
        tracing::debug!(
            generation = request.generation,
            page = request.page,
            "fetching recipe page"
        );
        let result = api
            .list_recipes(&request.filters, request.page, request.page_size)
            .await;
        let mut list = state.lock().await;
        match result {
            Ok(page) => {
                if !list.apply_success(request.generation, page) {
                    tracing::debug!(generation = request.generation, "discarding stale page");
                }
            }
            Err(error) => {
                tracing::warn!(%error, page = request.page, "recipe fetch failed");
                list.apply_failure(request.generation, FETCH_FAILED_MESSAGE);
            }
        }
    }
}
