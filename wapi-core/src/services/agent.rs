// src/services/agent.rs

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::Error;
use crate::eventbus::EventBus;
use crate::services::{CrudService, Toasts};
use wapi_common::models::{Agent, AgentPatch, AgentStatus};
use wapi_common::traits::Repository;

const TOASTS: Toasts = Toasts {
    created: "Agent created successfully",
    updated: "Agent updated successfully",
    deleted: "Agent deleted successfully",
    duplicated: "Agent duplicated successfully",
};

/// Header cards of the agent-management page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStats {
    pub total: usize,
    pub active: usize,
    pub total_chats: u64,
    /// Mean of `response_time` in minutes; 0 when there are no agents.
    pub avg_response_time: f64,
}

impl AgentStats {
    pub fn compute(agents: &[Agent]) -> Self {
        let total = agents.len();
        let avg_response_time = if total == 0 {
            0.0
        } else {
            agents.iter().map(|a| a.response_time).sum::<f64>() / total as f64
        };
        Self {
            total,
            active: agents.iter().filter(|a| a.status == AgentStatus::Active).count(),
            total_chats: agents.iter().map(|a| u64::from(a.total_chats)).sum(),
            avg_response_time,
        }
    }
}

pub struct AgentService {
    crud: CrudService<Agent>,
}

impl AgentService {
    pub fn new(repo: Arc<dyn Repository<Agent>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, TOASTS) }
    }

    pub async fn stats(&self) -> Result<AgentStats, Error> {
        Ok(AgentStats::compute(&self.crud.list().await?))
    }

    /// Flip `enabled`; an enabled agent is `active`, a disabled one `offline`.
    pub async fn toggle(&self, id: &str) -> Result<Vec<Agent>, Error> {
        let agent = self
            .crud
            .repo()
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("agents '{}'", id)))?;

        let enable = !agent.enabled;
        let patch = AgentPatch {
            enabled: Some(enable),
            status: Some(if enable { AgentStatus::Active } else { AgentStatus::Offline }),
            ..Default::default()
        };
        let items = self.crud.repo().update(id, &patch).await?;
        info!("agent '{}' enabled={}", agent.name, enable);
        self.crud.notifier().success("Agent status updated").await;
        Ok(items)
    }
}

impl Deref for AgentService {
    type Target = CrudService<Agent>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
