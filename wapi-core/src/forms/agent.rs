use chrono::{NaiveDate, Utc};

use super::{EntityForm, non_empty, parse_count_or, split_list};
use wapi_common::models::{Agent, AgentPatch, AgentRole, AgentStatus};

/// Concurrent chat cap used when the field is blank or not a number.
pub const DEFAULT_MAX_CONCURRENT_CHATS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub status: AgentStatus,
    pub role: AgentRole,
    pub skills: String,
    pub languages: String,
    pub max_concurrent_chats: String,
    pub notes: String,
}

impl Default for AgentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            status: AgentStatus::Active,
            role: AgentRole::Agent,
            skills: String::new(),
            languages: String::new(),
            max_concurrent_chats: String::new(),
            notes: String::new(),
        }
    }
}

impl EntityForm for AgentForm {
    type Entity = Agent;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", &self.name),
            ("email", &self.email),
            ("department", &self.department),
        ]
    }

    fn into_new(self, today: NaiveDate) -> Agent {
        Agent {
            id: String::new(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            department: self.department,
            status: self.status,
            role: self.role,
            skills: split_list(&self.skills),
            languages: split_list(&self.languages),
            max_concurrent_chats: parse_count_or(
                &self.max_concurrent_chats,
                DEFAULT_MAX_CONCURRENT_CHATS,
            ),
            current_chats: 0,
            total_chats: 0,
            response_time: 0.0,
            satisfaction: 0.0,
            joined_date: today,
            last_active: Utc::now().to_rfc3339(),
            notes: non_empty(self.notes),
            enabled: true,
        }
    }

    fn into_patch(self) -> AgentPatch {
        AgentPatch {
            name: Some(self.name),
            email: Some(self.email),
            phone: Some(self.phone),
            department: Some(self.department),
            status: Some(self.status),
            role: Some(self.role),
            skills: Some(split_list(&self.skills)),
            languages: Some(split_list(&self.languages)),
            max_concurrent_chats: Some(parse_count_or(
                &self.max_concurrent_chats,
                DEFAULT_MAX_CONCURRENT_CHATS,
            )),
            notes: Some(self.notes),
            enabled: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_cap_falls_back_to_five() {
        let agent = AgentForm {
            name: "Sara".into(),
            email: "sara@wapi.io".into(),
            department: "Support".into(),
            max_concurrent_chats: "lots".into(),
            skills: "billing, , refunds".into(),
            ..Default::default()
        }
        .into_new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(agent.max_concurrent_chats, 5);
        assert_eq!(agent.skills, vec!["billing", "refunds"]);
        assert!(agent.enabled);
        assert_eq!(agent.notes, None);
    }

    #[test]
    fn department_is_required() {
        let form = AgentForm { name: "a".into(), email: "b".into(), ..Default::default() };
        assert_eq!(form.validate().unwrap_err().missing_fields(), &["department"]);
    }
}
