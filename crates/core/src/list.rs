//! Recipe list controller: filter state, debounced search, and paginated
//! fetch accumulation.
//!
//! The controller is a synchronous state machine that *emits* fetch
//! requests instead of performing them, so the supersession and debounce
//! rules are testable without a runtime. The async driver in
//! `ladle-client` executes each [`FetchRequest`] and feeds the outcome
//! back through [`RecipeListController::apply_success`] /
//! [`RecipeListController::apply_failure`].
//!
//! Two rules carry the correctness of this module:
//!
//! * every issued request is tagged with a monotonically increasing
//!   generation, and a response whose generation is no longer the latest
//!   is discarded (a stale fetch must never overwrite newer state);
//! * a page-0 result **replaces** the accumulated list (filter changes
//!   produce a fresh result set), while a page>0 result is **appended**
//!   (infinite-scroll accumulation).

use std::collections::BTreeSet;
use std::time::Duration;

use crate::types::{DbId, Difficulty, FilterState, Pagination, RecipePage, RecipeSummary};

/// Recipes fetched per page.
pub const PAGE_SIZE: u32 = 20;

/// Pause after the last keystroke before the search input is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A fetch the driver should execute. Carries everything the API call
/// needs plus the generation tag for stale-response detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub filters: FilterState,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone)]
pub struct RecipeListController {
    filters: FilterState,
    /// Search text as typed, shown immediately; committed into
    /// `filters.search` only after the debounce pause.
    search_input: String,
    recipes: Vec<RecipeSummary>,
    pagination: Option<Pagination>,
    loading: bool,
    error: Option<String>,
    current_page: u32,
    generation: u64,
    page_size: u32,
    debounce: Duration,
}

impl Default for RecipeListController {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListController {
    pub fn new() -> Self {
        Self::with_config(PAGE_SIZE, SEARCH_DEBOUNCE)
    }

    pub fn with_config(page_size: u32, debounce: Duration) -> Self {
        Self {
            filters: FilterState::default(),
            search_input: String::new(),
            recipes: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            current_page: 0,
            generation: 0,
            page_size,
            debounce,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The staged (not yet committed) search text, for display.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    // -- fetch triggers -----------------------------------------------------

    /// The mount-time fetch for the unfiltered first page.
    pub fn initial_fetch(&mut self) -> FetchRequest {
        self.issue_fetch()
    }

    /// Stage a new search input. Returns the debounce delay; the caller
    /// must cancel any previously scheduled commit and schedule
    /// [`commit_search`](Self::commit_search) after this pause, so only
    /// the final pending timer fires.
    pub fn set_search(&mut self, text: impl Into<String>) -> Duration {
        self.search_input = text.into();
        self.debounce
    }

    /// The debounce pause elapsed: commit the staged input. No-op when
    /// the committed value would not change — a fetch is triggered by a
    /// change to `(page, filters)`, never by the timer alone.
    pub fn commit_search(&mut self) -> Option<FetchRequest> {
        if self.search_input == self.filters.search {
            return None;
        }
        self.filters.search = self.search_input.clone();
        self.current_page = 0;
        Some(self.issue_fetch())
    }

    pub fn set_category_filter(&mut self, category_ids: BTreeSet<DbId>) -> Option<FetchRequest> {
        if category_ids == self.filters.category_ids {
            return None;
        }
        self.filters.category_ids = category_ids;
        self.current_page = 0;
        Some(self.issue_fetch())
    }

    pub fn set_difficulty_filter(&mut self, difficulty: Option<Difficulty>) -> Option<FetchRequest> {
        if difficulty == self.filters.difficulty {
            return None;
        }
        self.filters.difficulty = difficulty;
        self.current_page = 0;
        Some(self.issue_fetch())
    }

    /// Reset all filters and the staged search input. No-op when nothing
    /// is filtered.
    pub fn clear_all_filters(&mut self) -> Option<FetchRequest> {
        if !self.filters.has_active_filters() && self.search_input.is_empty() {
            return None;
        }
        self.filters = FilterState::default();
        self.search_input.clear();
        self.current_page = 0;
        Some(self.issue_fetch())
    }

    /// Advance to the next page, if the server reported one and no fetch
    /// is in flight. Duplicate calls while loading are no-ops.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        let has_next = self.pagination.as_ref().is_some_and(|p| p.has_next);
        if !has_next || self.loading {
            return None;
        }
        self.current_page += 1;
        Some(self.issue_fetch())
    }

    /// Re-issue the current `(filters, page)` after a failure. Explicit
    /// user action only; failed fetches are never retried silently.
    pub fn retry(&mut self) -> FetchRequest {
        self.issue_fetch()
    }

    fn issue_fetch(&mut self) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchRequest {
            generation: self.generation,
            filters: self.filters.clone(),
            page: self.current_page,
            page_size: self.page_size,
        }
    }

    // -- fetch outcomes -----------------------------------------------------

    /// Apply a successful fetch result. Returns `false` (and changes
    /// nothing) when the response is stale, i.e. a newer request was
    /// issued while this one was in flight.
    pub fn apply_success(&mut self, generation: u64, page: RecipePage) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.error = None;
        if self.current_page == 0 {
            self.recipes = page.recipes;
        } else {
            self.recipes.extend(page.recipes);
        }
        self.pagination = Some(page.pagination);
        true
    }

    /// Apply a failed fetch. The accumulated recipes and pagination are
    /// left intact; only the user-facing error message is set. Stale
    /// failures are discarded like stale successes.
    pub fn apply_failure(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }
}
