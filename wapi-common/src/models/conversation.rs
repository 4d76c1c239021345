use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::models::ids::string_or_number;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
}

/// Whether the 24 hour customer-service window is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Expired,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxTab {
    All,
    Mine,
    New,
}

impl fmt::Display for InboxTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboxTab::All => write!(f, "all"),
            InboxTab::Mine => write!(f, "mine"),
            InboxTab::New => write!(f, "new"),
        }
    }
}

impl FromStr for InboxTab {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(InboxTab::All),
            "mine" => Ok(InboxTab::Mine),
            "new" => Ok(InboxTab::New),
            _ => Err(format!("Unknown inbox tab: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: MessageSender,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub status: MessageStatus,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub last_message: String,
    /// Relative display text such as "an hour ago" or "now".
    pub timestamp: String,
    pub reply_status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_left: Option<u32>,
    #[serde(default)]
    pub has_star: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub unread_count: u32,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl Conversation {
    /// Tab membership. The "mine" tab has no assignment model and is always empty.
    pub fn in_tab(&self, tab: InboxTab) -> bool {
        match tab {
            InboxTab::All => !self.is_archived,
            InboxTab::Mine => false,
            InboxTab::New => self.reply_status == ReplyStatus::Active && !self.is_archived,
        }
    }

    pub fn message_mut(&mut self, message_id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationPatch {
    pub has_star: Option<bool>,
    pub is_archived: Option<bool>,
    pub unread_count: Option<u32>,
    pub last_message: Option<String>,
    pub timestamp: Option<String>,
}

impl Entity for Conversation {
    type Patch = ConversationPatch;

    const STORAGE_KEY: &'static str = "chatConversations";

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

    fn apply_patch(&mut self, patch: &ConversationPatch) {
        if let Some(v) = patch.has_star {
            self.has_star = v;
        }
        if let Some(v) = patch.is_archived {
            self.is_archived = v;
        }
        if let Some(v) = patch.unread_count {
            self.unread_count = v;
        }
        if let Some(v) = &patch.last_message {
            self.last_message = v.clone();
        }
        if let Some(v) = &patch.timestamp {
            self.timestamp = v.clone();
        }
    }

    fn on_duplicate(&mut self, _today: chrono::NaiveDate, _collection_len: usize) {
        self.unread_count = 0;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term) || contains_ci(&self.last_message, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_layout_deserializes_with_numeric_id() {
        let raw = r#"{"id":2,"name":"Ali","phone":"+92 301 7654321","lastMessage":"Let me ask him.",
            "timestamp":"2 hours ago","replyStatus":"active","hoursLeft":21,"unreadCount":1,
            "messages":[{"id":"1","content":"Hi","sender":"contact","timestamp":"2025-01-14T10:00:00",
            "status":"read","type":"text"}]}"#;
        let c: Conversation = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id, "2");
        assert_eq!(c.hours_left, Some(21));
        assert!(!c.has_star);
        assert_eq!(c.messages[0].kind, MessageKind::Text);
    }

    #[test]
    fn archived_conversations_leave_every_tab() {
        let raw = r#"{"id":"9","name":"n","phone":"p","lastMessage":"m","timestamp":"now",
            "replyStatus":"active","isArchived":true,"unreadCount":0}"#;
        let c: Conversation = serde_json::from_str(raw).unwrap();
        assert!(!c.in_tab(InboxTab::All));
        assert!(!c.in_tab(InboxTab::Mine));
        assert!(!c.in_tab(InboxTab::New));
    }
}
