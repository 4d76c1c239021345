// src/repositories/sqlite/local_storage.rs

use async_trait::async_trait;
use sqlx::Row;
use tracing::debug;

use crate::Error;
use crate::utils::time::current_epoch;
use wapi_common::traits::KeyValueStore;

/// Key/value storage persisted as rows of the `local_storage` table.
pub struct SqliteStore {
    pub pool: sqlx::Pool<sqlx::Sqlite>,
}

impl SqliteStore {
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let row = sqlx::query(
            r#"
            SELECT value
            FROM local_storage
            WHERE key = ?
            "#
        )
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(r.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE
                SET value = excluded.value,
                    updated_at = excluded.updated_at
            "#
        )
            .bind(key)
            .bind(value)
            .bind(current_epoch())
            .execute(&self.pool)
            .await?;
        debug!("persisted {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let rows = sqlx::query("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            out.push(r.try_get("key")?);
        }
        Ok(out)
    }
}
