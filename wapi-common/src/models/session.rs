use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage keys the session gate reads and writes.
pub struct SessionFlags;

impl SessionFlags {
    pub const LOGGED_IN: &'static str = "isLoggedIn";
    pub const USER_EMAIL: &'static str = "userEmail";
    pub const USER_NAME: &'static str = "userName";
    pub const SESSION_TOKEN: &'static str = "sessionToken";

    /// The three flags the dashboard has always cleared on logout.
    pub const LOGOUT_CLEARS: [&'static str; 3] =
        [Self::LOGGED_IN, Self::USER_EMAIL, Self::USER_NAME];
}

/// A server-side issued session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub token: Uuid,
    pub email: String,
    pub display_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
