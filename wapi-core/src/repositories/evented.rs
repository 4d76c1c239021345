use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::Error;
use crate::eventbus::EventBus;
use wapi_common::traits::KeyValueStore;

/// Wraps a store and announces every successful write or removal on the bus,
/// the way the browser fires `storage` events at other tabs.
pub struct EventedStore {
    inner: Arc<dyn KeyValueStore>,
    bus: EventBus,
}

impl EventedStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, bus: EventBus) -> Self {
        Self { inner, bus }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

#[async_trait]
impl KeyValueStore for EventedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.inner.set(key, value).await?;
        trace!("storage key '{}' written", key);
        self.bus.publish_storage_change(key, false).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.inner.remove(key).await?;
        self.bus.publish_storage_change(key, true).await;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        self.inner.keys().await
    }
}
