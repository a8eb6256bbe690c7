//! Authenticated session returned by the login endpoint.

use ladle_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A logged-in user's session. The `user_id` is attached to every
/// request as the `X-User-Id` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn expiry_is_inclusive_of_the_deadline() {
        let now = Utc::now();
        let session = Session {
            token: "tok".into(),
            username: "anna".into(),
            user_id: 1,
            expires_at: now,
        };
        assert!(session.is_expired(now));
        assert!(!session.is_expired(now - Duration::seconds(1)));
        assert!(session.is_expired(now + Duration::seconds(1)));
    }
}
