use chrono::NaiveDate;

use super::{EntityForm, non_empty, parse_count_or, parse_float_or};
use wapi_common::models::{AgencyClient, AgencyClientPatch, AgencyStatus, AgencyTier};

#[derive(Debug, Clone, PartialEq)]
pub struct AgencyClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: AgencyStatus,
    pub tier: AgencyTier,
    pub clients: String,
    pub revenue: String,
    pub commission: String,
    pub notes: String,
}

impl Default for AgencyClientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            status: AgencyStatus::Active,
            tier: AgencyTier::Bronze,
            clients: String::new(),
            revenue: String::new(),
            commission: String::new(),
            notes: String::new(),
        }
    }
}

impl EntityForm for AgencyClientForm {
    type Entity = AgencyClient;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", &self.name),
            ("email", &self.email),
            ("company", &self.company),
        ]
    }

    fn into_new(self, today: NaiveDate) -> AgencyClient {
        AgencyClient {
            id: String::new(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            status: self.status,
            tier: self.tier,
            clients: parse_count_or(&self.clients, 0),
            revenue: parse_float_or(&self.revenue, 0.0),
            commission: parse_float_or(&self.commission, 0.0),
            joined_date: today,
            notes: non_empty(self.notes),
        }
    }

    fn into_patch(self) -> AgencyClientPatch {
        AgencyClientPatch {
            name: Some(self.name),
            email: Some(self.email),
            phone: Some(self.phone),
            company: Some(self.company),
            status: Some(self.status),
            tier: Some(self.tier),
            clients: Some(parse_count_or(&self.clients, 0)),
            revenue: Some(parse_float_or(&self.revenue, 0.0)),
            commission: Some(parse_float_or(&self.commission, 0.0)),
            notes: Some(self.notes),
        }
    }
}
