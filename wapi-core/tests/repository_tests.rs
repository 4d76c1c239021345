// tests/repository_tests.rs

use std::sync::Arc;

use chrono::NaiveDate;

use wapi_common::models::{BotStatus, BotType, Campaign, CampaignPatch, CampaignStatus, ReplyBot};
use wapi_common::traits::{Entity, KeyValueStore, Repository};
use wapi_core::Error;
use wapi_core::db::Database;
use wapi_core::repositories::{CollectionRepository, InMemoryStore, SqliteStore};
use wapi_core::seed;
use wapi_core::test_utils::helpers::*;

fn campaign(name: &str) -> Campaign {
    Campaign {
        id: String::new(),
        name: name.to_string(),
        template: "welcome".to_string(),
        contacts: 120,
        delivered_to: 0,
        read_by: 0,
        status: CampaignStatus::Draft,
        created_at: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        scheduled_for: None,
        message: "Hi".to_string(),
        template_id: String::new(),
    }
}

async fn stored<T: Entity>(store: &dyn KeyValueStore) -> Result<Vec<T>, Error> {
    let raw = store.get(T::STORAGE_KEY).await?.unwrap_or_else(|| "[]".into());
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::test]
async fn create_grows_the_collection_and_persists_it() -> Result<(), Error> {
    let store = Arc::new(InMemoryStore::new());
    let repo = CollectionRepository::new(store.clone(), seed::campaigns()?);
    let before = repo.list().await?.len();

    let items = repo.create(campaign("Spring Sale")).await?;
    assert_eq!(items.len(), before + 1);
    let created = &items[0];
    assert_eq!(created.name, "Spring Sale");
    assert_eq!(created.contacts, 120);
    assert!(created.id.parse::<i64>().is_ok(), "id is a millisecond timestamp");

    assert_eq!(stored::<Campaign>(store.as_ref()).await?, items);
    Ok(())
}

#[tokio::test]
async fn update_applied_twice_equals_once() -> Result<(), Error> {
    let store = Arc::new(InMemoryStore::new());
    let repo = CollectionRepository::new(store.clone(), seed::campaigns()?);
    let id = repo.list().await?[0].id.clone();

    let patch = CampaignPatch {
        name: Some("Renamed".into()),
        status: Some(CampaignStatus::Paused),
        ..Default::default()
    };
    let once = repo.update(&id, &patch).await?;
    let twice = repo.update(&id, &patch).await?;
    assert_eq!(once, twice);
    assert_eq!(stored::<Campaign>(store.as_ref()).await?, twice);
    Ok(())
}

#[tokio::test]
async fn removing_twice_is_a_no_op_the_second_time() -> Result<(), Error> {
    let store = Arc::new(InMemoryStore::new());
    let repo = CollectionRepository::new(store.clone(), seed::campaigns()?);
    let id = repo.list().await?[0].id.clone();

    let first = repo.remove(&id).await?;
    assert!(first.iter().all(|c| c.id != id));
    let second = repo.remove(&id).await?;
    assert_eq!(first, second);
    assert_eq!(stored::<Campaign>(store.as_ref()).await?, second);
    Ok(())
}

#[tokio::test]
async fn duplicate_copies_fields_and_resets_progress() -> Result<(), Error> {
    let repo = CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::reply_bots()?);
    let original: ReplyBot = repo.get("1").await?.unwrap();
    assert!(original.triggers > 0);

    let items = repo.duplicate("1").await?;
    let copy = items.last().unwrap();
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, format!("{} (Copy)", original.name));
    assert_eq!((copy.triggers, copy.responses), (0, 0));
    assert_eq!(copy.status, BotStatus::Draft);
    assert!(!copy.enabled);
    assert_eq!(copy.last_active, "Never");
    assert_eq!(copy.bot_type, BotType::Welcome);
    assert_eq!(copy.keywords, original.keywords);
    assert_eq!(copy.response_message, original.response_message);
    Ok(())
}

#[tokio::test]
async fn duplicate_of_unknown_id_is_not_found() -> Result<(), Error> {
    let repo = CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::reply_bots()?);
    assert!(matches!(repo.duplicate("nope").await, Err(Error::NotFound(_))));
    assert_eq!(repo.list().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn sqlite_store_round_trips_a_collection() -> Result<(), Error> {
    let store = sqlite_store().await?;
    let repo = CollectionRepository::new(store.clone(), seed::campaigns()?);
    let items = repo.create(campaign("Stored")).await?;

    let fresh = CollectionRepository::<Campaign>::unseeded(store.clone());
    assert_eq!(fresh.list().await?, items);
    assert_eq!(store.keys().await?, ["broadcastCampaigns"]);
    Ok(())
}

#[tokio::test]
async fn sqlite_file_survives_a_reopen() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("wapi.db");
    let path = path.to_string_lossy().into_owned();

    {
        let db = Database::new(&path).await?;
        db.migrate().await?;
        let store = Arc::new(SqliteStore::new(db.pool().clone()));
        let repo = CollectionRepository::<Campaign>::unseeded(store);
        repo.create(campaign("Persistent")).await?;
        db.pool().close().await;
    }

    let db = Database::new(&path).await?;
    db.migrate().await?;
    let store = Arc::new(SqliteStore::new(db.pool().clone()));
    let repo = CollectionRepository::new(store, seed::campaigns()?);
    let names: Vec<String> = repo.list().await?.into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Persistent"], "stored data wins over the seed");
    Ok(())
}

#[tokio::test]
async fn removing_a_key_reseeds_on_next_load() -> Result<(), Error> {
    let store = sqlite_store().await?;
    let repo = CollectionRepository::new(store.clone(), seed::campaigns()?);
    repo.replace_all(vec![]).await?;

    store.remove("broadcastCampaigns").await?;
    assert!(store.get("broadcastCampaigns").await?.is_none());
    assert_eq!(repo.reload().await?.len(), 2);
    Ok(())
}
