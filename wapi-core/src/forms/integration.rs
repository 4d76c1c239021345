use serde_json::Value;

use crate::Error;
use wapi_common::models::{Integration, IntegrationConfig};

/// The configure modal of an integration card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationConfigForm {
    pub api_key: String,
    pub webhook_url: String,
    pub enabled: bool,
    /// Free-form JSON object typed by the operator.
    pub custom_settings: String,
}

impl IntegrationConfigForm {
    pub fn from_integration(i: &Integration) -> Self {
        let cfg = i.config.clone().unwrap_or_default();
        let settings = cfg.settings.unwrap_or_else(|| Value::Object(Default::default()));
        Self {
            api_key: cfg.api_key.unwrap_or_default(),
            webhook_url: cfg.webhook_url.unwrap_or_default(),
            enabled: cfg.enabled.unwrap_or(false),
            custom_settings: serde_json::to_string_pretty(&settings).unwrap_or_default(),
        }
    }

    /// Blank settings count as `{}`; anything else must be valid JSON.
    pub fn into_config(self) -> Result<IntegrationConfig, Error> {
        let settings = if self.custom_settings.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&self.custom_settings)
                .map_err(|_| Error::Parse("Invalid JSON in custom settings".into()))?
        };
        Ok(IntegrationConfig {
            api_key: Some(self.api_key),
            webhook_url: Some(self.webhook_url),
            enabled: Some(self.enabled),
            settings: Some(settings),
        })
    }
}
