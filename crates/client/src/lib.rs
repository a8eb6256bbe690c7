//! Async collaborator layer for the recipe client.
//!
//! `ladle-core` owns the synchronous state machines; this crate drives
//! them: an HTTP binding for the `/api/v1` backend, the debounced list
//! fetch driver with stale-response discard, the submit service with its
//! re-entrancy guard, and the auth flows.

pub mod api;
pub mod auth_service;
pub mod config;
pub mod editor_service;
pub mod error;
pub mod http;
pub mod list_service;
pub mod session;

pub use api::{AuthApi, RecipeApi};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpRecipeApi;
pub use session::Session;
