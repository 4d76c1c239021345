use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatAgentStatus {
    Online,
    Away,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatAgentRole {
    #[serde(rename = "Senior Agent")]
    Senior,
    #[serde(rename = "Agent")]
    Agent,
    #[serde(rename = "Junior Agent")]
    Junior,
    #[serde(rename = "Bot Agent")]
    Bot,
}

impl ChatAgentRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatAgentRole::Senior => "Senior Agent",
            ChatAgentRole::Agent => "Agent",
            ChatAgentRole::Junior => "Junior Agent",
            ChatAgentRole::Bot => "Bot Agent",
        }
    }
}

/// An inbox agent shown on the chat-agents page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAgent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: ChatAgentRole,
    pub status: ChatAgentStatus,
    pub active_chats: u32,
    pub total_chats: u32,
    pub rating: f64,
    pub last_active: String,
    pub skills: Vec<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatAgentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<ChatAgentRole>,
    pub status: Option<ChatAgentStatus>,
    pub skills: Option<Vec<String>>,
    pub enabled: Option<bool>,
}

/// `jane@x.com` becomes `jane_copy@x.com`; addresses without `@` just get the suffix.
pub fn copy_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{local}_copy@{domain}"),
        None => format!("{email}_copy"),
    }
}

impl Entity for ChatAgent {
    type Patch = ChatAgentPatch;

    const STORAGE_KEY: &'static str = "chatAgents";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn apply_patch(&mut self, patch: &ChatAgentPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = patch.role {
            self.role = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = &patch.skills {
            self.skills = v.clone();
        }
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
    }

    fn on_duplicate(&mut self, _today: NaiveDate, _collection_len: usize) {
        self.email = copy_email(&self.email);
        self.active_chats = 0;
        self.total_chats = 0;
        self.last_active = "Now".to_string();
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.email, term)
            || contains_ci(self.role.label(), term)
    }
}
