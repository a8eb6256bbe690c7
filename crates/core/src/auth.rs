//! Local credential validation for the login and registration forms.
//!
//! These forms are flat, so the derive-based rules cover them; the
//! recipe draft with its indexed rows keeps its bespoke engine in
//! [`crate::validation`]. Validation runs before any network call —
//! invalid credentials never leave the client.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Letters, digits, and underscores only.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("static regex"));

/// Field-keyed error messages for the flat auth forms.
pub type AuthErrors = BTreeMap<String, String>;

/// Login form payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form payload for `POST /auth/register`.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct Registration {
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username must be between 3 and 50 characters"
        ),
        regex(
            path = *USERNAME_RE,
            message = "Username can only contain letters, numbers, and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Validate login credentials. Both fields are merely required.
pub fn validate_login(credentials: &Credentials) -> AuthErrors {
    let mut errors = AuthErrors::new();
    if credentials.username.is_empty() {
        errors.insert("username".into(), "Username is required".into());
    }
    if credentials.password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    }
    errors
}

/// Validate a registration payload. Empty fields report the plain
/// "required" message; non-empty fields get the derive-based length and
/// pattern rules.
pub fn validate_registration(registration: &Registration) -> AuthErrors {
    let mut errors = AuthErrors::new();

    if registration.username.is_empty() {
        errors.insert("username".into(), "Username is required".into());
    }
    if registration.password.is_empty() {
        errors.insert("password".into(), "Password is required".into());
    }

    if let Err(derive_errors) = registration.validate() {
        for (field, field_errors) in derive_errors.field_errors() {
            if errors.contains_key::<str>(field.as_ref()) {
                continue; // required message wins on empty fields
            }
            if let Some(message) = field_errors.first().and_then(|e| e.message.as_ref()) {
                errors.insert(field.to_string(), message.to_string());
            }
        }
    }

    errors
}
