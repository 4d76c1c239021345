use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::Error;
use wapi_common::models::SessionRecord;
use wapi_common::traits::SessionVerifier;

/// `now + ttl`, or an auth error when that leaves chrono's range.
pub(crate) fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, Error> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| Error::Auth(format!("session lifetime of {ttl} is out of range")))
}

/// Process-local session registry.
pub struct InMemorySessionRegistry {
    sessions: DashMap<Uuid, SessionRecord>,
    ttl: Duration,
}

impl InMemorySessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionVerifier for InMemorySessionRegistry {
    async fn issue(&self, email: &str, display_name: &str) -> Result<SessionRecord, Error> {
        let now = Utc::now();
        let record = SessionRecord {
            token: Uuid::new_v4(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            issued_at: now,
            expires_at: expiry_from(now, self.ttl)?,
        };
        self.sessions.insert(record.token, record.clone());
        Ok(record)
    }

    async fn verify(&self, token: &str) -> Result<Option<SessionRecord>, Error> {
        let token = Uuid::parse_str(token)?;
        let now = Utc::now();
        match self.sessions.get(&token) {
            None => return Ok(None),
            Some(r) if !r.is_expired(now) => return Ok(Some(r.clone())),
            Some(_) => {}
        };
        self.sessions.remove(&token);
        Ok(None)
    }

    async fn revoke(&self, token: &str) -> Result<(), Error> {
        if let Ok(token) = Uuid::parse_str(token) {
            self.sessions.remove(&token);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_token_verifies_until_revoked() -> Result<(), Error> {
        let reg = InMemorySessionRegistry::new(Duration::hours(1));
        let rec = reg.issue("demo@flaxxawapi.com", "Demo").await?;
        let token = rec.token.to_string();

        assert_eq!(reg.verify(&token).await?.map(|r| r.email), Some("demo@flaxxawapi.com".into()));
        reg.revoke(&token).await?;
        assert!(reg.verify(&token).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected_and_dropped() -> Result<(), Error> {
        let reg = InMemorySessionRegistry::new(Duration::seconds(-1));
        let rec = reg.issue("a@b.c", "A").await?;
        assert!(reg.verify(&rec.token.to_string()).await?.is_none());
        assert!(reg.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unrepresentable_lifetime_fails_instead_of_panicking() {
        let reg = InMemorySessionRegistry::new(Duration::MAX);
        assert!(matches!(reg.issue("a@b.c", "A").await, Err(Error::Auth(_))));
        assert!(reg.is_empty());
    }

    #[tokio::test]
    async fn malformed_token_is_an_auth_error() {
        let reg = InMemorySessionRegistry::new(Duration::hours(1));
        assert!(matches!(reg.verify("true").await, Err(Error::Auth(_))));
    }
}
