use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::models::ids::string_or_number;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Active,
    Inactive,
}

/// Display-only identity record; nothing references contacts by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub country_code: String,
    pub phone: String,
    pub country_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub last_message: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub country_name: Option<String>,
    pub email: Option<String>,
    pub groups: Option<Vec<String>>,
    pub status: Option<ContactStatus>,
    pub tags: Option<Vec<String>>,
}

impl Entity for Contact {
    type Patch = ContactPatch;

    const STORAGE_KEY: &'static str = "contacts";

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

    fn apply_patch(&mut self, patch: &ContactPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.country_code {
            self.country_code = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        if let Some(v) = &patch.country_name {
            self.country_name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.groups {
            self.groups = v.clone();
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = &patch.tags {
            self.tags = v.clone();
        }
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.phone, term)
            || contains_ci(&self.email, term)
    }
}

/// Column filters from the contacts page. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilter {
    pub name: String,
    pub phone: String,
    pub groups: String,
    pub country: String,
    pub email: String,
}

impl ContactFilter {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.phone, &self.groups, &self.country, &self.email]
            .iter()
            .all(|f| f.trim().is_empty())
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        let phone = format!("{} {}", contact.country_code, contact.phone);
        contains_ci(&contact.name, self.name.trim())
            && contains_ci(&phone, self.phone.trim())
            && (self.groups.trim().is_empty()
                || contact.groups.iter().any(|g| contains_ci(g, self.groups.trim())))
            && contains_ci(&contact.country_name, self.country.trim())
            && contains_ci(&contact.email, self.email.trim())
    }
}

/// A coloured label that can be attached to contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLabel {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    /// Stops the AI bot from answering contacts carrying this label.
    pub ai_bot_stop_label: bool,
    pub status: String,
    pub creation_date: NaiveDate,
}

impl ContactLabel {
    pub const DEFAULT_COLOR: &'static str = "#16a34a";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactLabelPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub ai_bot_stop_label: Option<bool>,
    pub status: Option<String>,
}

impl Entity for ContactLabel {
    type Patch = ContactLabelPatch;

    const STORAGE_KEY: &'static str = "contactLabels";

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

    fn apply_patch(&mut self, patch: &ContactLabelPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.description {
            self.description = v.clone();
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
        if let Some(v) = patch.ai_bot_stop_label {
            self.ai_bot_stop_label = v;
        }
        if let Some(v) = &patch.status {
            self.status = v.clone();
        }
    }

    fn on_duplicate(&mut self, today: NaiveDate, _collection_len: usize) {
        self.creation_date = today;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term) || contains_ci(&self.description, term)
    }
}
