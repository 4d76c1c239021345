// src/repositories/collection.rs

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::Error;
use crate::utils::time::{next_timestamp_id, today};
use wapi_common::traits::{Entity, InsertPosition, KeyValueStore, Repository};

/// Write-through store for one entity collection.
///
/// The collection is loaded lazily on first use, from storage when the key
/// exists and from `seed` otherwise. Every mutation works on a copy, writes the
/// whole copy as a JSON array under `T::STORAGE_KEY`, and only then replaces
/// the cached collection. A failed write leaves both sides at the last
/// persisted state.
pub struct CollectionRepository<T: Entity> {
    store: Arc<dyn KeyValueStore>,
    seed: Vec<T>,
    state: Mutex<Option<Vec<T>>>,
}

impl<T: Entity> CollectionRepository<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, seed: Vec<T>) -> Self {
        Self {
            store,
            seed,
            state: Mutex::new(None),
        }
    }

    /// An empty-seeded repository.
    pub fn unseeded(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Vec::new())
    }

    pub fn storage_key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    /// Forget the cached collection so the next call re-reads storage.
    /// This is what a storage-change listener does.
    pub async fn reload(&self) -> Result<Vec<T>, Error> {
        let mut guard = self.state.lock().await;
        *guard = None;
        Ok(self.loaded(&mut *guard).await?.clone())
    }

    async fn loaded<'a>(&self, slot: &'a mut Option<Vec<T>>) -> Result<&'a mut Vec<T>, Error> {
        if slot.is_none() {
            let items = match self.store.get(T::STORAGE_KEY).await? {
                Some(raw) => serde_json::from_str::<Vec<T>>(&raw).map_err(|source| {
                    Error::CorruptStorage { key: T::STORAGE_KEY.to_string(), source }
                })?,
                None => {
                    info!("seeding '{}' with {} default entries", T::STORAGE_KEY, self.seed.len());
                    self.persist(&self.seed).await?;
                    self.seed.clone()
                }
            };
            *slot = Some(items);
        }
        slot.as_mut()
            .ok_or_else(|| Error::Storage(format!("collection '{}' failed to load", T::STORAGE_KEY)))
    }

    async fn persist(&self, items: &[T]) -> Result<(), Error> {
        let raw = serde_json::to_string(items)?;
        self.store.set(T::STORAGE_KEY, &raw).await.inspect_err(|e| {
            warn!("write to '{}' failed, keeping last persisted state: {}", T::STORAGE_KEY, e);
        })?;
        debug!("'{}' persisted ({} entries)", T::STORAGE_KEY, items.len());
        Ok(())
    }

    /// Run `f` on a copy of the collection, persist it, then commit it to the cache.
    async fn mutate<F>(&self, f: F) -> Result<Vec<T>, Error>
    where
        F: FnOnce(&mut Vec<T>) -> Result<bool, Error> + Send,
    {
        let mut guard = self.state.lock().await;
        let current = self.loaded(&mut *guard).await?;
        let mut next = current.clone();
        if !f(&mut next)? {
            return Ok(next);
        }
        self.persist(&next).await?;
        *current = next.clone();
        Ok(next)
    }

    /// Edit one record in place with `f`, for changes a `Patch` cannot express
    /// (appending to a nested list, say). Persisted like any other mutation.
    pub async fn modify<F>(&self, id: &str, f: F) -> Result<Vec<T>, Error>
    where
        F: FnOnce(&mut T) + Send,
    {
        self.mutate(|items| {
            let target = items
                .iter_mut()
                .find(|i| i.id() == id)
                .ok_or_else(|| Error::NotFound(format!("{} '{}'", T::STORAGE_KEY, id)))?;
            f(target);
            Ok(true)
        })
        .await
    }

    fn insert(items: &mut Vec<T>, item: T) {
        match T::INSERT_POSITION {
            InsertPosition::Append => items.push(item),
            InsertPosition::Prepend => items.insert(0, item),
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for CollectionRepository<T> {
    async fn list(&self) -> Result<Vec<T>, Error> {
        let mut guard = self.state.lock().await;
        Ok(self.loaded(&mut *guard).await?.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<T>, Error> {
        let mut guard = self.state.lock().await;
        let items = self.loaded(&mut *guard).await?;
        Ok(items.iter().find(|i| i.id() == id).cloned())
    }

    /// Items arriving without an id get a timestamp id.
    async fn create(&self, mut item: T) -> Result<Vec<T>, Error> {
        if item.id().is_empty() {
            item.set_id(next_timestamp_id());
        }
        self.mutate(move |items| {
            Self::insert(items, item);
            Ok(true)
        })
        .await
    }

    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Vec<T>, Error> {
        self.mutate(|items| {
            let target = items
                .iter_mut()
                .find(|i| i.id() == id)
                .ok_or_else(|| Error::NotFound(format!("{} '{}'", T::STORAGE_KEY, id)))?;
            target.apply_patch(patch);
            Ok(true)
        })
        .await
    }

    async fn remove(&self, id: &str) -> Result<Vec<T>, Error> {
        self.mutate(|items| {
            let before = items.len();
            items.retain(|i| i.id() != id);
            Ok(items.len() != before)
        })
        .await
    }

    async fn duplicate(&self, id: &str) -> Result<Vec<T>, Error> {
        let new_id = next_timestamp_id();
        let today = today();
        self.mutate(move |items| {
            let source = items
                .iter()
                .find(|i| i.id() == id)
                .ok_or_else(|| Error::NotFound(format!("{} '{}'", T::STORAGE_KEY, id)))?;
            let copy = source.duplicated(new_id, today, items.len());
            Self::insert(items, copy);
            Ok(true)
        })
        .await
    }

    async fn replace_all(&self, items: Vec<T>) -> Result<Vec<T>, Error> {
        self.mutate(move |current| {
            *current = items;
            Ok(true)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use chrono::NaiveDate;
    use wapi_common::models::{Campaign, CampaignPatch, CampaignStatus};

    fn campaign(id: &str, name: &str) -> Campaign {
        Campaign {
            id: id.into(),
            name: name.into(),
            template: "Welcome Template".into(),
            contacts: 10,
            delivered_to: 8,
            read_by: 4,
            status: CampaignStatus::Completed,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            scheduled_for: None,
            message: "Hi".into(),
            template_id: "welcome_001".into(),
        }
    }

    #[tokio::test]
    async fn first_load_persists_the_seed() -> Result<(), Error> {
        let store = Arc::new(InMemoryStore::new());
        let repo = CollectionRepository::new(store.clone(), vec![campaign("1", "Seeded")]);

        assert_eq!(repo.list().await?.len(), 1);
        let raw = store.get("broadcastCampaigns").await?.unwrap();
        assert!(raw.contains("Seeded"));
        Ok(())
    }

    #[tokio::test]
    async fn stored_empty_array_is_not_reseeded() -> Result<(), Error> {
        let store = Arc::new(InMemoryStore::with_entries([("broadcastCampaigns", "[]")]));
        let repo = CollectionRepository::new(store, vec![campaign("1", "Seeded")]);
        assert!(repo.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn campaigns_are_prepended() -> Result<(), Error> {
        let repo = CollectionRepository::new(
            Arc::new(InMemoryStore::new()),
            vec![campaign("1", "Old")],
        );
        let items = repo.create(campaign("", "New")).await?;
        assert_eq!(items[0].name, "New");
        assert!(!items[0].id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_changes_nothing() -> Result<(), Error> {
        let repo = CollectionRepository::new(
            Arc::new(InMemoryStore::new()),
            vec![campaign("1", "Only")],
        );
        let err = repo
            .update("404", &CampaignPatch { name: Some("x".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(repo.list().await?[0].name, "Only");
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_json_is_reported_with_its_key() {
        let store = Arc::new(InMemoryStore::with_entries([("broadcastCampaigns", "{not json")]));
        let repo: CollectionRepository<Campaign> = CollectionRepository::unseeded(store);
        match repo.list().await {
            Err(Error::CorruptStorage { key, .. }) => assert_eq!(key, "broadcastCampaigns"),
            other => panic!("expected corrupt storage, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reload_picks_up_external_writes() -> Result<(), Error> {
        let store = Arc::new(InMemoryStore::new());
        let repo: CollectionRepository<Campaign> = CollectionRepository::unseeded(store.clone());
        assert!(repo.list().await?.is_empty());

        let other_tab = CollectionRepository::<Campaign>::unseeded(store);
        other_tab.create(campaign("7", "From elsewhere")).await?;

        assert!(repo.list().await?.is_empty());
        assert_eq!(repo.reload().await?.len(), 1);
        Ok(())
    }
}
