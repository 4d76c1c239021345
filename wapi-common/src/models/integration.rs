use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::contains_ci;
use crate::models::ids::string_or_number;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Disconnected,
    Configuring,
    Testing,
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationStatus::Connected => write!(f, "connected"),
            IntegrationStatus::Disconnected => write!(f, "disconnected"),
            IntegrationStatus::Configuring => write!(f, "configuring"),
            IntegrationStatus::Testing => write!(f, "testing"),
        }
    }
}

impl FromStr for IntegrationStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "connected" => Ok(IntegrationStatus::Connected),
            "disconnected" => Ok(IntegrationStatus::Disconnected),
            "configuring" => Ok(IntegrationStatus::Configuring),
            "testing" => Ok(IntegrationStatus::Testing),
            _ => Err(format!("Unknown integration status: {}", s)),
        }
    }
}

/// Opaque per-integration settings. Nothing reads `settings` beyond storing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// A third-party service descriptor from the static integrations catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_type: String,
    pub status: IntegrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<IntegrationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    pub category: String,
}

/// `Some(None)` clears `config` / `last_sync`; `None` leaves them alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationPatch {
    pub status: Option<IntegrationStatus>,
    pub config: Option<Option<IntegrationConfig>>,
    pub last_sync: Option<Option<String>>,
}

impl Entity for Integration {
    type Patch = IntegrationPatch;

    const STORAGE_KEY: &'static str = "integrations";

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

    fn apply_patch(&mut self, patch: &IntegrationPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(config) = &patch.config {
            self.config = config.clone();
        }
        if let Some(last_sync) = &patch.last_sync {
            self.last_sync = last_sync.clone();
        }
    }

    fn on_duplicate(&mut self, _today: chrono::NaiveDate, _collection_len: usize) {
        self.status = IntegrationStatus::Disconnected;
        self.config = None;
        self.last_sync = None;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term) || contains_ci(&self.category, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_and_extra_widget_fields_are_accepted() {
        let raw = r#"{"id":5,"name":"Open_AI","description":"AI","iconType":"openai","hasButtons":true,
            "buttons":[{"text":"Configure","variant":"default"}],"status":"connected",
            "config":{"apiKey":"sk-***hidden***","enabled":true},"lastSync":"2025-01-14 10:30","category":"AI"}"#;
        let i: Integration = serde_json::from_str(raw).unwrap();
        assert_eq!(i.id, "5");
        assert_eq!(i.config.unwrap().api_key.as_deref(), Some("sk-***hidden***"));
    }

    #[test]
    fn clearing_patch_drops_config() {
        let mut i = Integration {
            id: "5".into(),
            name: "Open_AI".into(),
            description: String::new(),
            icon_type: "openai".into(),
            status: IntegrationStatus::Connected,
            config: Some(IntegrationConfig::default()),
            last_sync: Some("yesterday".into()),
            category: "AI".into(),
        };
        i.apply_patch(&IntegrationPatch {
            status: Some(IntegrationStatus::Disconnected),
            config: Some(None),
            last_sync: Some(None),
        });
        assert_eq!(i.status, IntegrationStatus::Disconnected);
        assert!(i.config.is_none());
        assert!(i.last_sync.is_none());
    }
}
