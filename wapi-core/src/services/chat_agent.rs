// src/services/chat_agent.rs

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

use crate::Error;
use crate::eventbus::EventBus;
use crate::services::{CrudService, Toasts};
use wapi_common::models::{ChatAgent, ChatAgentPatch, ChatAgentRole, ChatAgentStatus};
use wapi_common::traits::Repository;

const TOASTS: Toasts = Toasts {
    created: "Agent created successfully",
    updated: "Agent updated successfully",
    deleted: "Agent deleted successfully",
    duplicated: "Agent duplicated successfully",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatAgentStats {
    pub total: usize,
    pub online: usize,
    pub active_chats: u64,
    pub bot_agents: usize,
}

impl ChatAgentStats {
    pub fn compute(agents: &[ChatAgent]) -> Self {
        Self {
            total: agents.len(),
            online: agents.iter().filter(|a| a.status == ChatAgentStatus::Online).count(),
            active_chats: agents.iter().map(|a| u64::from(a.active_chats)).sum(),
            bot_agents: agents.iter().filter(|a| a.role == ChatAgentRole::Bot).count(),
        }
    }
}

pub struct ChatAgentService {
    crud: CrudService<ChatAgent>,
}

impl ChatAgentService {
    pub fn new(repo: Arc<dyn Repository<ChatAgent>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, TOASTS) }
    }

    pub async fn stats(&self) -> Result<ChatAgentStats, Error> {
        Ok(ChatAgentStats::compute(&self.crud.list().await?))
    }

    /// Disabling takes the agent offline; enabling brings it back online.
    pub async fn toggle(&self, id: &str) -> Result<Vec<ChatAgent>, Error> {
        let agent = self
            .crud
            .repo()
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("chatAgents '{}'", id)))?;

        let enable = !agent.enabled;
        let patch = ChatAgentPatch {
            enabled: Some(enable),
            status: Some(if enable { ChatAgentStatus::Online } else { ChatAgentStatus::Offline }),
            ..Default::default()
        };
        let items = self.crud.repo().update(id, &patch).await?;
        self.crud.notifier().success("Agent status updated").await;
        Ok(items)
    }
}

impl Deref for ChatAgentService {
    type Target = CrudService<ChatAgent>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
