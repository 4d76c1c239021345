use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotType {
    Welcome,
    Support,
    Sales,
    Faq,
    Custom,
}

impl BotType {
    pub fn label(&self) -> &'static str {
        match self {
            BotType::Welcome => "Welcome Bot",
            BotType::Support => "Support Bot",
            BotType::Sales => "Sales Bot",
            BotType::Faq => "FAQ Bot",
            BotType::Custom => "Custom Bot",
        }
    }
}

impl fmt::Display for BotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotType::Welcome => write!(f, "welcome"),
            BotType::Support => write!(f, "support"),
            BotType::Sales => write!(f, "sales"),
            BotType::Faq => write!(f, "faq"),
            BotType::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for BotType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "welcome" => Ok(BotType::Welcome),
            "support" => Ok(BotType::Support),
            "sales" => Ok(BotType::Sales),
            "faq" => Ok(BotType::Faq),
            "custom" => Ok(BotType::Custom),
            _ => Err(format!("Unknown bot type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    Active,
    Inactive,
    Draft,
}

/// Keyword-triggered auto reply bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBot {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub bot_type: BotType,
    pub status: BotStatus,
    pub triggers: u32,
    pub responses: u32,
    /// A date, or the literal "Never" for bots that were never enabled.
    pub last_active: String,
    pub created_at: NaiveDate,
    pub enabled: bool,
    pub keywords: Vec<String>,
    pub response_message: String,
    pub trigger_conditions: Vec<String>,
}

impl ReplyBot {
    /// Whether an incoming message text hits one of this bot's keywords.
    pub fn is_triggered_by(&self, text: &str) -> bool {
        self.enabled && self.keywords.iter().any(|k| contains_ci(text, k))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyBotPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub bot_type: Option<BotType>,
    pub keywords: Option<Vec<String>>,
    pub response_message: Option<String>,
    pub trigger_conditions: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub status: Option<BotStatus>,
    pub last_active: Option<String>,
}

impl Entity for ReplyBot {
    type Patch = ReplyBotPatch;

    const STORAGE_KEY: &'static str = "replyBots";

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

    fn apply_patch(&mut self, patch: &ReplyBotPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.description {
            self.description = v.clone();
        }
        if let Some(v) = patch.bot_type {
            self.bot_type = v;
        }
        if let Some(v) = &patch.keywords {
            self.keywords = v.clone();
        }
        if let Some(v) = &patch.response_message {
            self.response_message = v.clone();
        }
        if let Some(v) = &patch.trigger_conditions {
            self.trigger_conditions = v.clone();
        }
        if let Some(v) = patch.enabled {
            self.enabled = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = &patch.last_active {
            self.last_active = v.clone();
        }
    }

    fn on_duplicate(&mut self, today: NaiveDate, _collection_len: usize) {
        self.status = BotStatus::Draft;
        self.triggers = 0;
        self.responses = 0;
        self.last_active = "Never".to_string();
        self.created_at = today;
        self.enabled = false;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
    }
}
