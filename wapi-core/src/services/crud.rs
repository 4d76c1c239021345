// src/services/crud.rs

use std::sync::Arc;

use tracing::info;

use crate::Error;
use crate::eventbus::EventBus;
use crate::forms::EntityForm;
use crate::services::{Notifier, listing};
use crate::utils::time::today;
use wapi_common::traits::{Entity, Repository};

/// Success toasts for the four CRUD actions of one page.
#[derive(Debug, Clone, Copy)]
pub struct Toasts {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub duplicated: &'static str,
}

/// Create, edit, delete and duplicate for one collection, with the toast
/// each page shows afterwards. Page services wrap this and add their own actions.
pub struct CrudService<T: Entity> {
    repo: Arc<dyn Repository<T>>,
    notifier: Notifier,
    toasts: Toasts,
}

impl<T: Entity> CrudService<T> {
    pub fn new(repo: Arc<dyn Repository<T>>, bus: Option<EventBus>, toasts: Toasts) -> Self {
        Self {
            repo,
            notifier: Notifier::new(bus),
            toasts,
        }
    }

    pub fn repo(&self) -> &Arc<dyn Repository<T>> {
        &self.repo
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn list(&self) -> Result<Vec<T>, Error> {
        self.repo.list().await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<T>, Error> {
        Ok(listing::search(self.repo.list().await?, term))
    }

    /// Validate the create modal and insert the new record.
    pub async fn submit_new<F>(&self, form: F) -> Result<Vec<T>, Error>
    where
        F: EntityForm<Entity = T>,
    {
        if let Err(e) = form.validate() {
            return Err(self.notifier.rejected(e).await);
        }
        self.create(form.into_new(today())).await
    }

    /// Validate the edit modal and patch record `id` with it.
    pub async fn submit_edit<F>(&self, id: &str, form: F) -> Result<Vec<T>, Error>
    where
        F: EntityForm<Entity = T>,
    {
        if let Err(e) = form.validate() {
            return Err(self.notifier.rejected(e).await);
        }
        self.update(id, &form.into_patch()).await
    }

    pub async fn create(&self, item: T) -> Result<Vec<T>, Error> {
        let items = self.repo.create(item).await?;
        info!("created entry in '{}' ({} total)", T::STORAGE_KEY, items.len());
        self.notifier.success(self.toasts.created).await;
        Ok(items)
    }

    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<Vec<T>, Error> {
        let items = self.repo.update(id, patch).await?;
        self.notifier.success(self.toasts.updated).await;
        Ok(items)
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<T>, Error> {
        let items = self.repo.remove(id).await?;
        self.notifier.success(self.toasts.deleted).await;
        Ok(items)
    }

    pub async fn duplicate(&self, id: &str) -> Result<Vec<T>, Error> {
        let items = self.repo.duplicate(id).await?;
        self.notifier.success(self.toasts.duplicated).await;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventbus::WapiEvent;
    use crate::forms::ChatAgentForm;
    use crate::repositories::{CollectionRepository, InMemoryStore};
    use wapi_common::models::{ChatAgent, NotificationLevel};
    use wapi_common::traits::KeyValueStore;

    const TOASTS: Toasts = Toasts {
        created: "Agent created successfully",
        updated: "Agent updated successfully",
        deleted: "Agent deleted successfully",
        duplicated: "Agent duplicated successfully",
    };

    #[tokio::test]
    async fn rejected_submit_toasts_an_error_and_writes_nothing() -> Result<(), Error> {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(None).await;
        let store = Arc::new(InMemoryStore::new());
        let repo = Arc::new(CollectionRepository::<ChatAgent>::unseeded(store.clone()));
        let svc = CrudService::new(repo, Some(bus), TOASTS);

        let err = svc.submit_new(ChatAgentForm::default()).await.unwrap_err();
        assert_eq!(err.missing_fields(), &["name", "email"]);
        assert!(store.get("chatAgents").await?.is_none());

        match rx.recv().await {
            Some(WapiEvent::Notification(n)) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert_eq!(n.message, "Please fill in all required fields");
            }
            other => panic!("expected a toast, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn successful_submit_toasts_the_page_message() -> Result<(), Error> {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(None).await;
        let repo = Arc::new(CollectionRepository::<ChatAgent>::unseeded(Arc::new(
            InMemoryStore::new(),
        )));
        let svc = CrudService::new(repo, Some(bus), TOASTS);

        let form = ChatAgentForm {
            name: "Nadia".into(),
            email: "nadia@x.com".into(),
            ..Default::default()
        };
        let items = svc.submit_new(form).await?;
        assert_eq!(items.len(), 1);

        // the repository is not evented here, so the toast is the only event
        assert_eq!(
            rx.recv().await,
            Some(WapiEvent::Notification(wapi_common::models::Notification::success(
                "Agent created successfully"
            )))
        );
        Ok(())
    }
}
