use chrono::NaiveDate;

use super::{EntityForm, non_empty, parse_count_or};
use crate::utils::time::next_timestamp_id;
use wapi_common::models::{Campaign, CampaignPatch, CampaignStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignForm {
    pub name: String,
    pub template: String,
    pub message: String,
    /// Empty for an unscheduled draft.
    pub scheduled_for: String,
    pub contacts: String,
}

impl CampaignForm {
    /// Prefill the edit modal from an existing campaign.
    pub fn from_campaign(c: &Campaign) -> Self {
        Self {
            name: c.name.clone(),
            template: c.template.clone(),
            message: c.message.clone(),
            scheduled_for: c.scheduled_for.clone().unwrap_or_default(),
            contacts: c.contacts.to_string(),
        }
    }
}

impl EntityForm for CampaignForm {
    type Entity = Campaign;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", &self.name),
            ("template", &self.template),
            ("message", &self.message),
        ]
    }

    fn into_new(self, today: NaiveDate) -> Campaign {
        let scheduled_for = non_empty(self.scheduled_for);
        Campaign {
            id: String::new(),
            status: CampaignStatus::from_schedule(scheduled_for.as_deref()),
            name: self.name,
            template: self.template,
            contacts: parse_count_or(&self.contacts, 0),
            delivered_to: 0,
            read_by: 0,
            created_at: today,
            scheduled_for,
            message: self.message,
            template_id: format!("template_{}", next_timestamp_id()),
        }
    }

    /// Saving the edit modal always re-derives the status from the schedule.
    fn into_patch(self) -> CampaignPatch {
        CampaignPatch {
            name: Some(self.name),
            template: Some(self.template),
            message: Some(self.message),
            scheduled_for: Some(self.scheduled_for.trim().to_string()),
            contacts: Some(parse_count_or(&self.contacts, 0)),
            status: None,
        }
    }
}
