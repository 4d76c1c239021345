// src/repositories/sqlite/session.rs

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::Error;
use crate::auth::registry::expiry_from;
use crate::utils::time::from_epoch;
use wapi_common::models::SessionRecord;
use wapi_common::traits::SessionVerifier;

/// Session registry kept in the `sessions` table so tokens outlive the process.
pub struct SqliteSessionRegistry {
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    ttl: Duration,
}

impl SqliteSessionRegistry {
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Drop every expired row. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, Error> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl SessionVerifier for SqliteSessionRegistry {
    async fn issue(&self, email: &str, display_name: &str) -> Result<SessionRecord, Error> {
        let now = Utc::now();
        let record = SessionRecord {
            token: Uuid::new_v4(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            issued_at: from_epoch(now.timestamp()),
            expires_at: from_epoch(expiry_from(now, self.ttl)?.timestamp()),
        };

        sqlx::query(
            r#"
            INSERT INTO sessions (token, email, display_name, issued_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
            .bind(record.token.to_string())
            .bind(&record.email)
            .bind(&record.display_name)
            .bind(record.issued_at.timestamp())
            .bind(record.expires_at.timestamp())
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn verify(&self, token: &str) -> Result<Option<SessionRecord>, Error> {
        let token = Uuid::parse_str(token)?;
        let row = sqlx::query(
            r#"
            SELECT email, display_name, issued_at, expires_at
            FROM sessions
            WHERE token = ?
            "#
        )
            .bind(token.to_string())
            .fetch_optional(&self.pool)
            .await?;

        let Some(r) = row else {
            return Ok(None);
        };
        let record = SessionRecord {
            token,
            email: r.try_get("email")?,
            display_name: r.try_get("display_name")?,
            issued_at: from_epoch(r.try_get::<i64, _>("issued_at")?),
            expires_at: from_epoch(r.try_get::<i64, _>("expires_at")?),
        };
        if record.is_expired(Utc::now()) {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn revoke(&self, token: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
