use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Where a freshly created record lands in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Append,
    Prepend,
}

/// A record shape that lives in one persisted collection.
///
/// Every dashboard page owns exactly one `Entity` type and one storage key.
/// The collection is written as a JSON array under `STORAGE_KEY`.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Typed partial update applied by `Repository::update`.
    type Patch: Send + Sync;

    const STORAGE_KEY: &'static str;
    const INSERT_POSITION: InsertPosition = InsertPosition::Append;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Display name; duplicates get `" (Copy)"` appended to it.
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);

    /// Must be idempotent: applying the same patch twice equals applying it once.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Reset progress counters and lifecycle fields on a fresh copy.
    /// `collection_len` is the length of the collection before the copy is inserted.
    fn on_duplicate(&mut self, _today: NaiveDate, _collection_len: usize) {}

    /// Case-insensitive free-text match used by list views.
    fn matches_search(&self, term: &str) -> bool;

    fn duplicated(&self, new_id: String, today: NaiveDate, collection_len: usize) -> Self {
        let mut copy = self.clone();
        copy.set_id(new_id);
        copy.set_name(format!("{} (Copy)", self.name()));
        copy.on_duplicate(today, collection_len);
        copy
    }
}

/// String key/value storage with the semantics of browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;
    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    async fn remove(&self, key: &str) -> Result<(), Error>;
    async fn keys(&self) -> Result<Vec<String>, Error>;
}

/// CRUD over one entity collection. Every mutating call returns the whole
/// collection as it now stands, and it is already persisted when the call returns.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, Error>;
    async fn get(&self, id: &str) -> Result<Option<T>, Error>;
    async fn create(&self, item: T) -> Result<Vec<T>, Error>;
    async fn update(&self, id: &str, patch: &T::Patch) -> Result<Vec<T>, Error>;

    /// Removing an id that is not present leaves the collection unchanged.
    async fn remove(&self, id: &str) -> Result<Vec<T>, Error>;
    async fn duplicate(&self, id: &str) -> Result<Vec<T>, Error>;

    /// Overwrite the whole collection, used by seeding and bulk actions.
    async fn replace_all(&self, items: Vec<T>) -> Result<Vec<T>, Error>;
}
