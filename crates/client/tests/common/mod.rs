//! Shared test fixtures: a scripted in-memory API and data builders.
// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use ladle_client::api::{AuthApi, RecipeApi};
use ladle_client::error::{ApiError, ApiResult};
use ladle_client::session::Session;
use ladle_core::auth::{Credentials, Registration};
use ladle_core::draft::RecipeRequest;
use ladle_core::form::RecipeFormController;
use ladle_core::path::IngredientField;
use ladle_core::types::{
    Category, DbId, Difficulty, FilterState, Pagination, RecipeDetail, RecipePage, RecipeSummary,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One scripted response, optionally delivered after a virtual-clock
/// delay so tests can interleave in-flight requests.
pub struct Scripted<T> {
    pub delay: Duration,
    pub result: ApiResult<T>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn ok_after(delay: Duration, value: T) -> Self {
        Self { delay, result: Ok(value) }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListCall {
    pub filters: FilterState,
    pub page: u32,
    pub page_size: u32,
}

/// Scripted API double. Each endpoint pops responses in script order;
/// an unscripted call fails loudly.
#[derive(Default)]
pub struct MockApi {
    pub categories: Mutex<Vec<Category>>,
    list_responses: Mutex<VecDeque<Scripted<RecipePage>>>,
    list_calls: Mutex<Vec<ListCall>>,
    get_responses: Mutex<VecDeque<Scripted<RecipeDetail>>>,
    create_responses: Mutex<VecDeque<Scripted<DbId>>>,
    create_calls: Mutex<Vec<RecipeRequest>>,
    update_responses: Mutex<VecDeque<Scripted<()>>>,
    update_calls: Mutex<Vec<(DbId, RecipeRequest)>>,
    delete_responses: Mutex<VecDeque<Scripted<()>>>,
    login_responses: Mutex<VecDeque<Scripted<Session>>>,
    login_calls: Mutex<Vec<Credentials>>,
    register_responses: Mutex<VecDeque<Scripted<()>>>,
    register_calls: Mutex<Vec<Registration>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_list(&self, scripted: Scripted<RecipePage>) {
        self.list_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_get(&self, scripted: Scripted<RecipeDetail>) {
        self.get_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_create(&self, scripted: Scripted<DbId>) {
        self.create_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_update(&self, scripted: Scripted<()>) {
        self.update_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_delete(&self, scripted: Scripted<()>) {
        self.delete_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_login(&self, scripted: Scripted<Session>) {
        self.login_responses.lock().unwrap().push_back(scripted);
    }

    pub fn script_register(&self, scripted: Scripted<()>) {
        self.register_responses.lock().unwrap().push_back(scripted);
    }

    pub fn list_calls(&self) -> Vec<ListCall> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<RecipeRequest> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<(DbId, RecipeRequest)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn login_calls(&self) -> Vec<Credentials> {
        self.login_calls.lock().unwrap().clone()
    }

    pub fn register_calls(&self) -> Vec<Registration> {
        self.register_calls.lock().unwrap().clone()
    }

    async fn pop<T>(queue: &Mutex<VecDeque<Scripted<T>>>, endpoint: &str) -> ApiResult<T> {
        let scripted = queue.lock().unwrap().pop_front();
        match scripted {
            Some(scripted) => {
                if scripted.delay > Duration::ZERO {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(ApiError::Unknown(format!("unscripted call to {endpoint}"))),
        }
    }
}

#[async_trait]
impl RecipeApi for MockApi {
    async fn list_recipes(
        &self,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> ApiResult<RecipePage> {
        self.list_calls.lock().unwrap().push(ListCall {
            filters: filters.clone(),
            page,
            page_size,
        });
        Self::pop(&self.list_responses, "list_recipes").await
    }

    async fn get_recipe(&self, _id: DbId) -> ApiResult<RecipeDetail> {
        Self::pop(&self.get_responses, "get_recipe").await
    }

    async fn create_recipe(&self, request: &RecipeRequest) -> ApiResult<DbId> {
        self.create_calls.lock().unwrap().push(request.clone());
        Self::pop(&self.create_responses, "create_recipe").await
    }

    async fn update_recipe(&self, id: DbId, request: &RecipeRequest) -> ApiResult<()> {
        self.update_calls.lock().unwrap().push((id, request.clone()));
        Self::pop(&self.update_responses, "update_recipe").await
    }

    async fn delete_recipe(&self, _id: DbId) -> ApiResult<()> {
        Self::pop(&self.delete_responses, "delete_recipe").await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.login_calls.lock().unwrap().push(credentials.clone());
        Self::pop(&self.login_responses, "login").await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        self.register_calls.lock().unwrap().push(registration.clone());
        Self::pop(&self.register_responses, "register").await
    }
}

// -- data builders ----------------------------------------------------------

pub fn summary(id: DbId) -> RecipeSummary {
    RecipeSummary {
        id,
        title: format!("Recipe {id}"),
        difficulty: Difficulty::Easy,
        cooking_time_minutes: 15,
        categories: vec![],
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

pub fn page(ids: std::ops::Range<DbId>, current_page: u32, has_next: bool) -> RecipePage {
    RecipePage {
        recipes: ids.map(summary).collect(),
        pagination: Pagination {
            current_page,
            total_pages: 5,
            total_recipes: 100,
            page_size: 20,
            has_next,
            has_previous: current_page > 0,
        },
    }
}

pub fn detail(id: DbId) -> RecipeDetail {
    RecipeDetail {
        id,
        title: "Beef Stew".into(),
        difficulty: Difficulty::Hard,
        cooking_time_minutes: 90,
        categories: vec![Category {
            id: 2,
            name: "Dinner".into(),
        }],
        ingredients: vec![ladle_core::types::Ingredient {
            id: 10,
            quantity: "2".into(),
            unit: "lbs".into(),
            name: "beef".into(),
        }],
        steps: vec![
            ladle_core::types::Step {
                id: 20,
                instruction: "Brown the beef".into(),
            },
            ladle_core::types::Step {
                id: 21,
                instruction: "Simmer for an hour".into(),
            },
        ],
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

/// A form that passes local validation.
pub fn valid_form() -> RecipeFormController {
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
    form
}

pub fn session() -> Session {
    Session {
        token: "tok-123".into(),
        username: "chef_anna".into(),
        user_id: 1,
        expires_at: chrono::DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc),
    }
}
