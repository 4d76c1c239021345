// tests/storage_failure_tests.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mockall::mock;

use wapi_common::models::{Campaign, CampaignPatch, CampaignStatus, NotificationLevel};
use wapi_common::traits::{KeyValueStore, Repository};
use wapi_core::Error;
use wapi_core::eventbus::{EventBus, WapiEvent};
use wapi_core::repositories::CollectionRepository;
use wapi_core::seed;
use wapi_core::services::CampaignService;

mock! {
    Store {}
    #[async_trait]
    impl KeyValueStore for Store {
        async fn get(&self, key: &str) -> Result<Option<String>, Error>;
        async fn set(&self, key: &str, value: &str) -> Result<(), Error>;
        async fn remove(&self, key: &str) -> Result<(), Error>;
        async fn keys(&self) -> Result<Vec<String>, Error>;
    }
}

fn stored_campaigns() -> Result<String, Error> {
    Ok(serde_json::to_string(&seed::campaigns()?)?)
}

#[tokio::test]
async fn failed_write_keeps_the_last_persisted_state() -> Result<(), Error> {
    let raw = stored_campaigns()?;
    let mut store = MockStore::new();
    store
        .expect_get()
        .withf(|key| key == "broadcastCampaigns")
        .times(1)
        .returning(move |_| Ok(Some(raw.clone())));
    store
        .expect_set()
        .returning(|_, _| Err(Error::Storage("quota exceeded".into())));

    let repo = CollectionRepository::<Campaign>::unseeded(Arc::new(store));
    let before = repo.list().await?;

    let patch = CampaignPatch { status: Some(CampaignStatus::Paused), ..Default::default() };
    assert!(matches!(repo.update("1", &patch).await, Err(Error::Storage(_))));
    assert!(matches!(repo.remove("2").await, Err(Error::Storage(_))));
    assert!(matches!(repo.duplicate("1").await, Err(Error::Storage(_))));

    assert_eq!(repo.list().await?, before);
    Ok(())
}

#[tokio::test]
async fn write_after_a_failure_starts_from_persisted_state() -> Result<(), Error> {
    let raw = stored_campaigns()?;
    let writes = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&writes);

    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(raw.clone())));
    store.expect_set().returning(move |_, value| {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(Error::Storage("disk full".into()));
        }
        let items: Vec<Campaign> = serde_json::from_str(value)?;
        assert_eq!(items.len(), 2, "the failed delete must not leak into this write");
        Ok(())
    });

    let repo = CollectionRepository::<Campaign>::unseeded(Arc::new(store));
    assert!(repo.remove("1").await.is_err());

    let patch = CampaignPatch { name: Some("Renamed".into()), ..Default::default() };
    let items = repo.update("1", &patch).await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().find(|c| c.id == "1").map(|c| c.name.as_str()), Some("Renamed"));
    assert_eq!(writes.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn unreadable_storage_surfaces_to_the_service() -> Result<(), Error> {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Err(Error::Storage("storage unavailable".into())));
    store.expect_set().never();

    let bus = EventBus::new();
    let mut rx = bus.subscribe(None).await;
    let repo = CollectionRepository::new(Arc::new(store), seed::campaigns()?);
    let svc = CampaignService::new(Arc::new(repo), Some(bus));

    assert!(matches!(svc.list().await, Err(Error::Storage(_))));
    assert!(matches!(svc.delete("1").await, Err(Error::Storage(_))));

    // nothing succeeded, so nothing was toasted
    while let Ok(event) = rx.try_recv() {
        if let WapiEvent::Notification(n) = event {
            assert_ne!(n.level, NotificationLevel::Success, "unexpected toast {:?}", n);
        }
    }
    Ok(())
}
