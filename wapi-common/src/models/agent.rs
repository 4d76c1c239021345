use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Busy,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Admin,
    Agent,
    Supervisor,
}

/// A support agent managed from the agent-management page.
///
/// The operational counters are only ever changed by manual edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub status: AgentStatus,
    pub role: AgentRole,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub max_concurrent_chats: u32,
    pub current_chats: u32,
    pub total_chats: u32,
    pub response_time: f64,
    pub satisfaction: f64,
    pub joined_date: NaiveDate,
    pub last_active: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub status: Option<AgentStatus>,
    pub role: Option<AgentRole>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub max_concurrent_chats: Option<u32>,
    pub notes: Option<String>,
    pub enabled: Option<bool>,
}

impl Entity for Agent {
    type Patch = AgentPatch;

    const STORAGE_KEY: &'static str = "agents";

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

    fn apply_patch(&mut self, patch: &AgentPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        if let Some(v) = &patch.department {
            self.department = v.clone();
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.role {
            self.role = v;
        }
        if let Some(v) = &patch.skills {
            self.skills = v.clone();
        }
        if let Some(v) = &patch.languages {
            self.languages = v.clone();
        }
        if let Some(v) = patch.max_concurrent_chats {
            self.max_concurrent_chats = v;
        }
        if let Some(v) = &patch.notes {
            self.notes = Some(v.clone());
        }
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
    }

    fn on_duplicate(&mut self, today: NaiveDate, _collection_len: usize) {
        self.current_chats = 0;
        self.total_chats = 0;
        self.joined_date = today;
        self.last_active = Utc::now().to_rfc3339();
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.email, term)
            || contains_ci(&self.department, term)
    }
}
