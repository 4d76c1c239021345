use async_trait::async_trait;
use dashmap::DashMap;

use crate::Error;
use wapi_common::traits::KeyValueStore;

/// Process-local key/value storage.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, handy for reading collections written elsewhere.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (k, v) in entries {
            store.entries.insert(k.into(), v.into());
        }
        store
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() -> Result<(), Error> {
        let store = InMemoryStore::new();
        assert_eq!(store.get("isLoggedIn").await?, None);

        store.set("isLoggedIn", "true").await?;
        assert_eq!(store.get("isLoggedIn").await?.as_deref(), Some("true"));

        store.remove("isLoggedIn").await?;
        store.remove("isLoggedIn").await?;
        assert!(store.keys().await?.is_empty());
        Ok(())
    }
}
