use chrono::NaiveDate;

use super::{EntityForm, split_list};
use wapi_common::models::{Contact, ContactLabel, ContactLabelPatch, ContactPatch, ContactStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub country_code: String,
    pub phone: String,
    pub country_name: String,
    pub email: String,
    pub groups: String,
    pub tags: String,
    pub status: ContactStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            country_code: String::new(),
            phone: String::new(),
            country_name: String::new(),
            email: String::new(),
            groups: String::new(),
            tags: String::new(),
            status: ContactStatus::Active,
        }
    }
}

impl EntityForm for ContactForm {
    type Entity = Contact;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name), ("phone", &self.phone)]
    }

    fn into_new(self, _today: NaiveDate) -> Contact {
        Contact {
            id: String::new(),
            name: self.name.trim().to_string(),
            country_code: self.country_code.trim().to_string(),
            phone: self.phone.trim().to_string(),
            country_name: self.country_name.trim().to_string(),
            email: self.email.trim().to_string(),
            groups: split_list(&self.groups),
            last_message: String::new(),
            status: self.status,
            tags: split_list(&self.tags),
        }
    }

    fn into_patch(self) -> ContactPatch {
        ContactPatch {
            name: Some(self.name.trim().to_string()),
            country_code: Some(self.country_code.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            country_name: Some(self.country_name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            groups: Some(split_list(&self.groups)),
            status: Some(self.status),
            tags: Some(split_list(&self.tags)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactLabelForm {
    pub name: String,
    pub description: String,
    pub color: String,
    pub ai_bot_stop_label: bool,
    pub status: String,
}

impl Default for ContactLabelForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            color: ContactLabel::DEFAULT_COLOR.to_string(),
            ai_bot_stop_label: false,
            status: "active".to_string(),
        }
    }
}

impl EntityForm for ContactLabelForm {
    type Entity = ContactLabel;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![("name", &self.name)]
    }

    fn into_new(self, today: NaiveDate) -> ContactLabel {
        ContactLabel {
            id: String::new(),
            name: self.name,
            description: self.description,
            color: self.color,
            ai_bot_stop_label: self.ai_bot_stop_label,
            status: self.status,
            creation_date: today,
        }
    }

    fn into_patch(self) -> ContactLabelPatch {
        ContactLabelPatch {
            name: Some(self.name),
            description: Some(self.description),
            color: Some(self.color),
            ai_bot_stop_label: Some(self.ai_bot_stop_label),
            status: Some(self.status),
        }
    }
}
