use chrono::NaiveDate;

use super::{EntityForm, split_list};
use wapi_common::models::{ChatAgent, ChatAgentPatch, ChatAgentRole, ChatAgentStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatAgentForm {
    pub name: String,
    pub email: String,
    pub role: ChatAgentRole,
    pub status: ChatAgentStatus,
    pub skills: String,
    pub enabled: bool,
}

impl Default for ChatAgentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: ChatAgentRole::Agent,
            status: ChatAgentStatus::Online,
            skills: String::new(),
            enabled: true,
        }
    }
}

impl EntityForm for ChatAgentForm {
    type Entity = ChatAgent;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name), ("email", &self.email)]
    }

    fn into_new(self, _today: NaiveDate) -> ChatAgent {
        ChatAgent {
            id: String::new(),
            name: self.name,
            email: self.email,
            role: self.role,
            status: self.status,
            active_chats: 0,
            total_chats: 0,
            rating: 0.0,
            last_active: "Now".to_string(),
            skills: split_list(&self.skills),
            enabled: self.enabled,
        }
    }

    fn into_patch(self) -> ChatAgentPatch {
        ChatAgentPatch {
            name: Some(self.name),
            email: Some(self.email),
            role: Some(self.role),
            status: Some(self.status),
            skills: Some(split_list(&self.skills)),
            enabled: Some(self.enabled),
        }
    }
}
