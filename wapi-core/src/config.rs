//! Runtime settings for the dashboard layer.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_DB_PATH: &str = "data/wapi.db";
pub const DEFAULT_LOGIN_EMAIL: &str = "demo@flaxxawapi.com";
pub const DEFAULT_LOGIN_PASSWORD: &str = "demo123";
pub const DEFAULT_DISPLAY_NAME: &str = "Muhammad Abdullah Qureshi";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub db_path: String,
    pub login_email: String,
    pub login_password: String,
    pub display_name: String,
    pub session_ttl_hours: i64,
    /// Delay before a sent inbox message shows as delivered.
    pub delivery_delay_ms: u64,
    /// Delay before a sent inbox message shows as read.
    pub read_delay_ms: u64,
    pub integration_test_delay_ms: u64,
    pub integration_sync_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            login_email: DEFAULT_LOGIN_EMAIL.to_string(),
            login_password: DEFAULT_LOGIN_PASSWORD.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            delivery_delay_ms: 1000,
            read_delay_ms: 2000,
            integration_test_delay_ms: 2000,
            integration_sync_delay_ms: 3000,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `WAPI_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reading through `lookup`, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("WAPI_DB") {
            cfg.db_path = v;
        }
        if let Some(v) = lookup("WAPI_LOGIN_EMAIL") {
            cfg.login_email = v;
        }
        if let Some(v) = lookup("WAPI_LOGIN_PASSWORD") {
            cfg.login_password = v;
        }
        if let Some(v) = lookup("WAPI_DISPLAY_NAME") {
            cfg.display_name = v;
        }
        if let Some(v) = lookup("WAPI_SESSION_TTL_HOURS") {
            match v.trim().parse::<i64>() {
                Ok(h) if (1..=MAX_SESSION_TTL_HOURS).contains(&h) => cfg.session_ttl_hours = h,
                _ => warn!("ignoring WAPI_SESSION_TTL_HOURS='{}', keeping {}", v, cfg.session_ttl_hours),
            }
        }
        cfg
    }

    /// `session_ttl_hours` clamped to `1..=MAX_SESSION_TTL_HOURS`.
    pub fn session_ttl(&self) -> chrono::Duration {
        let hours = self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX)
    }

    pub fn delivery_delay(&self) -> Duration {
        Duration::from_millis(self.delivery_delay_ms)
    }

    pub fn read_delay(&self) -> Duration {
        Duration::from_millis(self.read_delay_ms)
    }

    pub fn integration_test_delay(&self) -> Duration {
        Duration::from_millis(self.integration_test_delay_ms)
    }

    pub fn integration_sync_delay(&self) -> Duration {
        Duration::from_millis(self.integration_sync_delay_ms)
    }
}
