//! `reqwest` binding for the `/api/v1` backend.
//!
//! Every response body is wrapped in the server's envelope
//! (`{ status, message, data }`); error responses carry a flat
//! `errors` map of `field -> message`. Authenticated requests attach the
//! logged-in user's id as the `X-User-Id` header.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use ladle_core::auth::{Credentials, Registration};
use ladle_core::draft::RecipeRequest;
use ladle_core::types::{Category, DbId, FilterState, RecipeDetail, RecipePage};

use crate::api::{AuthApi, RecipeApi};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedData {
    recipe_id: DbId,
}

pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
    session: RwLock<Option<Session>>,
}

impl HttpRecipeApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        })
    }

    pub fn set_session(&self, session: Option<Session>) {
        if let Ok(mut guard) = self.session.write() {
            *guard = session;
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match self.session() {
            Some(session) => builder.header(USER_ID_HEADER, session.user_id),
            None => builder,
        }
    }

    /// Unwrap a success envelope, or map the error response.
    async fn parse_data<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let envelope: Envelope<T> = response.json().await?;
        envelope.data.ok_or_else(|| {
            ApiError::Unknown(
                envelope
                    .message
                    .unwrap_or_else(|| format!("response missing data (status {})", envelope.status)),
            )
        })
    }

    /// For endpoints whose success body carries no data worth reading.
    async fn expect_success(response: Response) -> ApiResult<()> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        let body: Option<ErrorBody> = response.json().await.ok();
        let errors = body.as_ref().and_then(|b| b.errors.clone());
        let message = body
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.to_string());
        match status {
            StatusCode::BAD_REQUEST => match errors {
                Some(map) => ApiError::Validation(map),
                None => ApiError::Unknown(message),
            },
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            // A duplicate username is the only conflict the server reports.
            StatusCode::CONFLICT => ApiError::Validation(
                [("username".to_string(), "Username already exists".to_string())].into(),
            ),
            // A 404 with a field map is a referenced-entity rejection
            // (e.g. a stale category id on submit), not a missing page.
            StatusCode::NOT_FOUND => match errors {
                Some(map) => ApiError::Validation(map),
                None => ApiError::NotFound,
            },
            _ => ApiError::Unknown(message),
        }
    }

    fn list_query(filters: &FilterState, page: u32, page_size: u32) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("size".to_string(), page_size.to_string()),
            ("sort".to_string(), "title".to_string()),
            ("direction".to_string(), "asc".to_string()),
        ];
        if !filters.category_ids.is_empty() {
            let csv = filters
                .category_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("categoryIds".to_string(), csv));
        }
        if let Some(difficulty) = filters.difficulty {
            query.push(("difficulty".to_string(), difficulty.to_string()));
        }
        if !filters.search.is_empty() {
            query.push(("search".to_string(), filters.search.clone()));
        }
        query
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list_recipes(
        &self,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> ApiResult<RecipePage> {
        let response = self
            .request(Method::GET, "/recipes")
            .query(&Self::list_query(filters, page, page_size))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_recipe(&self, id: DbId) -> ApiResult<RecipeDetail> {
        let response = self
            .request(Method::GET, &format!("/recipes/{id}"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn create_recipe(&self, request: &RecipeRequest) -> ApiResult<DbId> {
        let response = self
            .request(Method::POST, "/recipes")
            .json(request)
            .send()
            .await?;
        let created: CreatedData = Self::parse_data(response).await?;
        Ok(created.recipe_id)
    }

    async fn update_recipe(&self, id: DbId, request: &RecipeRequest) -> ApiResult<()> {
        let response = self
            .request(Method::PUT, &format!("/recipes/{id}"))
            .json(request)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete_recipe(&self, id: DbId) -> ApiResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/recipes/{id}"))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let response = self.request(Method::GET, "/categories").send().await?;
        Self::parse_data(response).await
    }
}

#[async_trait]
impl AuthApi for HttpRecipeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(credentials)
            .send()
            .await?;
        let session: Session = Self::parse_data(response).await?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(registration)
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
