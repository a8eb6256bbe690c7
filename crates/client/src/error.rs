//! Client-side error taxonomy for API calls.
//!
//! Transport failures and HTTP status codes are collapsed into a small
//! set of outcomes the controllers care about. Server validation errors
//! arrive as a flat `field -> message` map and are kept in wire form
//! here; callers convert recipe-form keys into typed paths where they
//! need them.

use std::collections::BTreeMap;

use thiserror::Error;

/// Flat `field -> message` map as sent in error response bodies.
pub type WireErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the payload with per-field messages.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(WireErrors),

    /// The requested entity does not exist (or was deleted meanwhile).
    #[error("not found")]
    NotFound,

    /// Missing or rejected credentials; the session should end.
    #[error("unauthorized")]
    Unauthorized,

    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// Anything else, including 5xx responses.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// The message shown to the user when the caller has no more
    /// specific handling for the failure.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields",
            Self::NotFound => "Recipe not found",
            Self::Unauthorized => "Your session has expired. Please log in again",
            Self::Network(_) => "Unable to reach the server. Please check your connection",
            Self::Unknown(_) => "Something went wrong. Please try again",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Network(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_cover_every_variant() {
        let errors = [
            ApiError::Validation(WireErrors::new()),
            ApiError::NotFound,
            ApiError::Unauthorized,
            ApiError::Network("refused".into()),
            ApiError::Unknown("500".into()),
        ];
        for error in errors {
            assert!(!error.user_message().is_empty());
        }
    }
}
