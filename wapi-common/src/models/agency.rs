use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contains_ci;
use crate::traits::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgencyStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgencyTier {
    Bronze,
    Silver,
    Gold,
}

impl AgencyTier {
    /// Next tier up, or `None` at gold.
    pub fn next(self) -> Option<Self> {
        match self {
            AgencyTier::Bronze => Some(AgencyTier::Silver),
            AgencyTier::Silver => Some(AgencyTier::Gold),
            AgencyTier::Gold => None,
        }
    }

    /// Commission after moving into this tier: +2 capped at 15 for silver,
    /// +3 capped at 20 for gold.
    pub fn commission_after_upgrade(self, current: f64) -> f64 {
        match self {
            AgencyTier::Bronze => current,
            AgencyTier::Silver => (current + 2.0).min(15.0),
            AgencyTier::Gold => (current + 3.0).min(20.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgencyTier::Bronze => "Bronze",
            AgencyTier::Silver => "Silver",
            AgencyTier::Gold => "Gold",
        }
    }
}

/// A reseller agency partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyClient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: AgencyStatus,
    pub tier: AgencyTier,
    pub clients: u32,
    pub revenue: f64,
    /// Percentage.
    pub commission: f64,
    pub joined_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgencyClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<AgencyStatus>,
    pub tier: Option<AgencyTier>,
    pub clients: Option<u32>,
    pub revenue: Option<f64>,
    pub commission: Option<f64>,
    pub notes: Option<String>,
}

impl Entity for AgencyClient {
    type Patch = AgencyClientPatch;

    const STORAGE_KEY: &'static str = "agencyClients";

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

    fn apply_patch(&mut self, patch: &AgencyClientPatch) {
        if let Some(v) = &patch.name {
            self.name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.phone {
            self.phone = v.clone();
        }
        if let Some(v) = &patch.company {
            self.company = v.clone();
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.tier {
            self.tier = v;
        }
        if let Some(v) = patch.clients {
            self.clients = v;
        }
        if let Some(v) = patch.revenue {
            self.revenue = v;
        }
        if let Some(v) = patch.commission {
            self.commission = v;
        }
        if let Some(v) = &patch.notes {
            self.notes = Some(v.clone());
        }
    }

    fn on_duplicate(&mut self, today: NaiveDate, _collection_len: usize) {
        self.clients = 0;
        self.revenue = 0.0;
        self.joined_date = today;
    }

    fn matches_search(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.company, term)
            || contains_ci(&self.email, term)
    }
}
