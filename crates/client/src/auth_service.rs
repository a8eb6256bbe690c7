//! Login and registration flows.
//!
//! Credentials are validated locally first; invalid ones never reach
//! the network. Server rejections are mapped onto the same field-keyed
//! error shape the local rules produce, so the views render both the
//! same way.

use std::sync::Arc;

use ladle_core::auth::{validate_login, validate_registration, AuthErrors, Credentials, Registration};

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::session::Session;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(Session),
    /// Local per-field errors; nothing was sent.
    Invalid(AuthErrors),
    /// The server rejected the username/password pair.
    InvalidCredentials,
    Failed(String),
}

impl LoginOutcome {
    /// Message to surface for non-field failures, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            Self::Failed(message) => Some(message),
            Self::Success(_) | Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success,
    /// Per-field errors, local or server-side (a taken username arrives
    /// here as a `username` error).
    Invalid(AuthErrors),
    Failed(String),
}

pub struct AuthService<A> {
    api: Arc<A>,
}

impl<A: AuthApi> AuthService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let errors = validate_login(credentials);
        if !errors.is_empty() {
            return LoginOutcome::Invalid(errors);
        }
        match self.api.login(credentials).await {
            Ok(session) => {
                tracing::info!(username = %session.username, "logged in");
                LoginOutcome::Success(session)
            }
            Err(ApiError::Unauthorized) => LoginOutcome::InvalidCredentials,
            Err(ApiError::Validation(errors)) => LoginOutcome::Invalid(errors),
            Err(other) => {
                tracing::warn!(%other, "login failed");
                LoginOutcome::Failed(other.user_message().to_string())
            }
        }
    }

    pub async fn register(&self, registration: &Registration) -> RegistrationOutcome {
        let errors = validate_registration(registration);
        if !errors.is_empty() {
            return RegistrationOutcome::Invalid(errors);
        }
        match self.api.register(registration).await {
            Ok(()) => RegistrationOutcome::Success,
            Err(ApiError::Validation(errors)) => RegistrationOutcome::Invalid(errors),
            Err(other) => {
                tracing::warn!(%other, "registration failed");
                RegistrationOutcome::Failed(other.user_message().to_string())
            }
        }
    }
}
