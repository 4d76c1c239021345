// src/services/agency.rs

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::Error;
use crate::eventbus::EventBus;
use crate::services::{CrudService, Toasts};
use wapi_common::models::{AgencyClient, AgencyClientPatch, AgencyStatus};
use wapi_common::traits::Repository;

const TOASTS: Toasts = Toasts {
    created: "Client created successfully",
    updated: "Client updated successfully",
    deleted: "Client deleted successfully",
    duplicated: "Client duplicated successfully",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyStats {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_revenue: f64,
    /// Sum of the sub-client counts across all agencies.
    pub total_client_count: u64,
}

impl AgencyStats {
    pub fn compute(clients: &[AgencyClient]) -> Self {
        Self {
            total_clients: clients.len(),
            active_clients: clients.iter().filter(|c| c.status == AgencyStatus::Active).count(),
            total_revenue: clients.iter().map(|c| c.revenue).sum(),
            total_client_count: clients.iter().map(|c| u64::from(c.clients)).sum(),
        }
    }
}

pub struct AgencyService {
    crud: CrudService<AgencyClient>,
}

impl AgencyService {
    pub fn new(repo: Arc<dyn Repository<AgencyClient>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, TOASTS) }
    }

    pub async fn stats(&self) -> Result<AgencyStats, Error> {
        Ok(AgencyStats::compute(&self.crud.list().await?))
    }

    /// Move a client one tier up and raise its commission. A gold client is
    /// left as is and only gets an informational toast.
    pub async fn upgrade(&self, id: &str) -> Result<Vec<AgencyClient>, Error> {
        let client = self
            .crud
            .repo()
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("agencyClients '{}'", id)))?;

        let Some(tier) = client.tier.next() else {
            self.crud
                .notifier()
                .info(format!("{} is already at the highest tier (Gold)", client.name))
                .await;
            return self.crud.list().await;
        };

        let patch = AgencyClientPatch {
            tier: Some(tier),
            commission: Some(tier.commission_after_upgrade(client.commission)),
            ..Default::default()
        };
        let items = self.crud.repo().update(id, &patch).await?;
        info!("agency '{}' upgraded to {}", client.name, tier.label());
        self.crud
            .notifier()
            .success(format!("{} upgraded to {} tier!", client.name, tier.label()))
            .await;
        Ok(items)
    }
}

impl Deref for AgencyService {
    type Target = CrudService<AgencyClient>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
