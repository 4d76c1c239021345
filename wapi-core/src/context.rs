//! src/context.rs
//!
//! The dashboard context: one storage backend, one event bus, and a service
//! per page, all sharing them.

use std::sync::Arc;

use tracing::info;

use crate::Error;
use crate::auth::{Credentials, SessionGate};
use crate::config::DashboardConfig;
use crate::db::Database;
use crate::eventbus::EventBus;
use crate::repositories::{
    CollectionRepository, EventedStore, InMemoryStore, SqliteSessionRegistry, SqliteStore,
};
use crate::seed;
use crate::services::{
    AgencyService, AgentService, CampaignService, CatalogueService, ChatAgentService,
    ContactLabelService, ContactService, InboxService, IntegrationService, OrderService,
    ReplyBotService,
};
use wapi_common::models::{Conversation, Notification};
use wapi_common::traits::{KeyValueStore, SessionVerifier};

pub struct DashboardContext {
    pub config: DashboardConfig,
    pub event_bus: EventBus,
    /// Storage as seen by the pages; every write publishes a storage change.
    pub store: Arc<dyn KeyValueStore>,
    pub verifier: Option<Arc<dyn SessionVerifier>>,
    pub session: Arc<SessionGate>,

    pub contacts: ContactService,
    pub contact_labels: ContactLabelService,
    pub campaigns: CampaignService,
    pub reply_bots: ReplyBotService,
    pub agents: AgentService,
    pub chat_agents: ChatAgentService,
    pub catalogue: CatalogueService,
    pub orders: OrderService,
    pub integrations: IntegrationService,
    pub agency: AgencyService,
    pub inbox: InboxService,

    /// Kept so a storage-change listener can drop the cached inbox.
    pub conversations: Arc<CollectionRepository<Conversation>>,
}

impl DashboardContext {
    /// Wire every page onto `backend`. Collections are seeded lazily, on the
    /// first read of a key that storage does not have yet.
    pub fn new(
        config: DashboardConfig,
        backend: Arc<dyn KeyValueStore>,
        verifier: Option<Arc<dyn SessionVerifier>>,
    ) -> Result<Self, Error> {
        let event_bus = EventBus::new();
        let store: Arc<dyn KeyValueStore> =
            Arc::new(EventedStore::new(backend, event_bus.clone()));
        let bus = Some(event_bus.clone());

        let session = Arc::new(Self::gate(&config, &store, &verifier, &event_bus));
        let conversations = Arc::new(CollectionRepository::new(
            Arc::clone(&store),
            seed::conversations()?,
        ));

        Ok(Self {
            contacts: ContactService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::contacts()?)),
                bus.clone(),
            ),
            contact_labels: ContactLabelService::new(
                Arc::new(CollectionRepository::unseeded(Arc::clone(&store))),
                bus.clone(),
            ),
            campaigns: CampaignService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::campaigns()?)),
                bus.clone(),
            ),
            reply_bots: ReplyBotService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::reply_bots()?)),
                bus.clone(),
            ),
            agents: AgentService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::agents()?)),
                bus.clone(),
            ),
            chat_agents: ChatAgentService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::chat_agents()?)),
                bus.clone(),
            ),
            catalogue: CatalogueService::new(
                Arc::new(CollectionRepository::new(
                    Arc::clone(&store),
                    seed::catalogue_items()?,
                )),
                bus.clone(),
            ),
            orders: OrderService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::orders()?)),
                bus.clone(),
            ),
            integrations: IntegrationService::new(
                Arc::new(CollectionRepository::new(Arc::clone(&store), seed::integrations()?)),
                bus.clone(),
                &config,
            ),
            agency: AgencyService::new(
                Arc::new(CollectionRepository::new(
                    Arc::clone(&store),
                    seed::agency_clients()?,
                )),
                bus.clone(),
            ),
            inbox: InboxService::new(Arc::clone(&conversations), bus, &config),
            conversations,
            session,
            verifier,
            store,
            event_bus,
            config,
        })
    }

    /// Everything in memory, no token verification. Used by tests.
    pub fn in_memory(config: DashboardConfig) -> Result<Self, Error> {
        Self::new(config, Arc::new(InMemoryStore::new()), None)
    }

    /// Open the SQLite file named by `config.db_path`, migrate it, and verify
    /// sessions against its `sessions` table.
    pub async fn open(config: DashboardConfig) -> Result<Self, Error> {
        let db = Database::new(&config.db_path).await?;
        db.migrate().await?;

        let registry = SqliteSessionRegistry::new(db.pool().clone(), config.session_ttl());
        let purged = registry.purge_expired().await?;
        if purged > 0 {
            info!("purged {} expired sessions", purged);
        }

        let backend: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db.pool().clone()));
        Self::new(config, backend, Some(Arc::new(registry)))
    }

    fn gate(
        config: &DashboardConfig,
        store: &Arc<dyn KeyValueStore>,
        verifier: &Option<Arc<dyn SessionVerifier>>,
        bus: &EventBus,
    ) -> SessionGate {
        let mut gate = SessionGate::new(Arc::clone(store), Credentials::from(config))
            .with_bus(bus.clone());
        if let Some(v) = verifier {
            gate = gate.with_verifier(Arc::clone(v));
        }
        gate
    }

    /// Another "browser tab" on the same storage: an independent gate that
    /// sees this context's writes through the event bus.
    pub fn open_tab(&self) -> Arc<SessionGate> {
        Arc::new(Self::gate(&self.config, &self.store, &self.verifier, &self.event_bus))
    }

    pub async fn toast(&self, n: Notification) {
        self.event_bus.notify(n).await;
    }

    pub fn shutdown(&self) {
        self.event_bus.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wapi_common::traits::Repository;

    #[tokio::test]
    async fn pages_seed_their_own_keys() -> Result<(), Error> {
        let ctx = DashboardContext::in_memory(DashboardConfig::default())?;
        assert_eq!(ctx.campaigns.list().await?.len(), 2);
        assert_eq!(ctx.integrations.list().await?.len(), 12);
        assert!(ctx.contact_labels.list().await?.is_empty());
        assert_eq!(ctx.conversations.list().await?.len(), 6);

        let keys = ctx.store.keys().await?;
        assert_eq!(keys, ["broadcastCampaigns", "chatConversations", "contactLabels", "integrations"]);
        Ok(())
    }
}
