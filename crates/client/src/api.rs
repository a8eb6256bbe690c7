//! The API surface the controllers are driven against.
//!
//! Services are generic over these traits so tests can script responses
//! without a server.

use async_trait::async_trait;
use ladle_core::auth::{Credentials, Registration};
use ladle_core::draft::RecipeRequest;
use ladle_core::types::{Category, DbId, FilterState, RecipeDetail, RecipePage};

use crate::error::ApiResult;
use crate::session::Session;

/// Recipe and category operations.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn list_recipes(
        &self,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> ApiResult<RecipePage>;

    async fn get_recipe(&self, id: DbId) -> ApiResult<RecipeDetail>;

    /// Returns the id of the created recipe.
    async fn create_recipe(&self, request: &RecipeRequest) -> ApiResult<DbId>;

    async fn update_recipe(&self, id: DbId, request: &RecipeRequest) -> ApiResult<()>;

    async fn delete_recipe(&self, id: DbId) -> ApiResult<()>;

    async fn list_categories(&self) -> ApiResult<Vec<Category>>;
}

/// Login and registration.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session>;

    async fn register(&self, registration: &Registration) -> ApiResult<()>;
}
