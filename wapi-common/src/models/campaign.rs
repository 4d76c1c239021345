// File: wapi-common/src/models/campaign.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::{Entity, InsertPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    Completed,
    Paused,
}

impl CampaignStatus {
    /// Status a campaign gets from its form: scheduled when a date is set, draft otherwise.
    pub fn from_schedule(scheduled_for: Option<&str>) -> Self {
        match scheduled_for {
            Some(s) if !s.trim().is_empty() => CampaignStatus::Scheduled,
            _ => CampaignStatus::Draft,
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Scheduled => write!(f, "scheduled"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Paused => write!(f, "paused"),
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(CampaignStatus::Draft),
            "scheduled" => Ok(CampaignStatus::Scheduled),
            "active" => Ok(CampaignStatus::Active),
            "completed" => Ok(CampaignStatus::Completed),
            "paused" => Ok(CampaignStatus::Paused),
            _ => Err(format!("Unknown campaign status: {}", s)),
        }
    }
}

/// A broadcast campaign. `template` is a free-text label, not a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub template: String,
    pub contacts: u32,
    pub delivered_to: u32,
    pub read_by: u32,
    pub status: CampaignStatus,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    pub message: String,
    pub template_id: String,
}

impl Campaign {
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_for
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// Partial update. When `status` is absent but `scheduled_for` is present the
/// status is re-derived from the schedule, the way the edit modal behaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub template: Option<String>,
    pub message: Option<String>,
    pub scheduled_for: Option<String>,
    pub contacts: Option<u32>,
    pub status: Option<CampaignStatus>,
}

impl Entity for Campaign {
    type Patch = CampaignPatch;

    const STORAGE_KEY: &'static str = "broadcastCampaigns";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;

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

    fn apply_patch(&mut self, patch: &CampaignPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(template) = &patch.template {
            self.template = template.clone();
        }
        if let Some(message) = &patch.message {
            self.message = message.clone();
        }
        if let Some(contacts) = patch.contacts {
            self.contacts = contacts;
        }
        if let Some(when) = &patch.scheduled_for {
            self.scheduled_for = Some(when.clone());
        }
        match patch.status {
            Some(status) => self.status = status,
            None if patch.scheduled_for.is_some() => {
                self.status = CampaignStatus::from_schedule(self.scheduled_for.as_deref());
            }
            None => {}
        }
    }

    fn on_duplicate(&mut self, today: NaiveDate, _collection_len: usize) {
        self.status = CampaignStatus::Draft;
        self.delivered_to = 0;
        self.read_by = 0;
        self.created_at = today;
        self.scheduled_for = Some(String::new());
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Campaign {
        Campaign {
            id: "1".into(),
            name: "Welcome Campaign".into(),
            template: "Welcome Template".into(),
            contacts: 150,
            delivered_to: 145,
            read_by: 98,
            status: CampaignStatus::Completed,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            scheduled_for: Some("2025-01-14 10:00".into()),
            message: "Welcome to our service!".into(),
            template_id: "welcome_001".into(),
        }
    }

    #[test]
    fn schedule_patch_rederives_status() {
        let mut c = sample();
        c.apply_patch(&CampaignPatch { scheduled_for: Some(String::new()), ..Default::default() });
        assert_eq!(c.status, CampaignStatus::Draft);
        c.apply_patch(&CampaignPatch {
            scheduled_for: Some("2025-02-01 09:00".into()),
            ..Default::default()
        });
        assert_eq!(c.status, CampaignStatus::Scheduled);
    }

    #[test]
    fn explicit_status_wins_over_schedule() {
        let mut c = sample();
        c.apply_patch(&CampaignPatch { status: Some(CampaignStatus::Paused), ..Default::default() });
        assert_eq!(c.status, CampaignStatus::Paused);
        assert_eq!(c.scheduled_for.as_deref(), Some("2025-01-14 10:00"));
    }

    #[test]
    fn duplicate_resets_delivery_and_schedule() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let copy = sample().duplicated("99".into(), today, 2);
        assert_eq!(copy.id, "99");
        assert_eq!(copy.name, "Welcome Campaign (Copy)");
        assert_eq!(copy.status, CampaignStatus::Draft);
        assert_eq!((copy.delivered_to, copy.read_by), (0, 0));
        assert_eq!(copy.contacts, 150);
        assert_eq!(copy.created_at, today);
        assert!(!copy.is_scheduled());
    }

    #[test]
    fn reads_the_dashboard_json_layout() {
        let raw = r#"{"id":"2","name":"Product Launch","template":"Product Template","contacts":200,
            "deliveredTo":0,"readBy":0,"status":"scheduled","createdAt":"2025-01-15",
            "scheduledFor":"2025-01-16 09:00","message":"Check out our new product!","templateId":"product_001"}"#;
        let c: Campaign = serde_json::from_str(raw).unwrap();
        assert_eq!(c.status, CampaignStatus::Scheduled);
        assert_eq!(c.template_id, "product_001");
        assert!("PAUSED".parse::<CampaignStatus>().is_ok());
    }
}
