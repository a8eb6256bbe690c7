//! Client configuration, read from the environment.

use std::time::Duration;

use ladle_core::list::{PAGE_SIZE, SEARCH_DEBOUNCE};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, including the `/api/v1` prefix.
    pub base_url: String,
    pub page_size: u32,
    pub search_debounce: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            page_size: PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults above. Call once at startup, after `dotenvy` has had
    /// a chance to populate the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            base_url: std::env::var("LADLE_API_BASE_URL").unwrap_or(defaults.base_url),
            page_size: env_parse("LADLE_PAGE_SIZE", defaults.page_size),
            search_debounce: Duration::from_millis(env_parse(
                "LADLE_SEARCH_DEBOUNCE_MS",
                defaults.search_debounce.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(env_parse(
                "LADLE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, raw, "ignoring unparseable config value");
                default
            }
        },
        Err(_) => default,
    }
}
