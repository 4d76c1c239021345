//! Default collections used when storage has no entry for a key yet.
//!
//! The seed files are stored in the same JSON layout the dashboard persists.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::Error;
use wapi_common::models::{
    Agent, AgencyClient, Campaign, CatalogueItem, ChatAgent, Contact, ContactLabel,
    Conversation, Integration, Order, ReplyBot,
};
use wapi_common::traits::Entity;

fn parse<T: Entity + DeserializeOwned>(raw: &str) -> Result<Vec<T>, Error> {
    serde_json::from_str(raw).map_err(|source| Error::CorruptStorage {
        key: format!("seed:{}", T::STORAGE_KEY),
        source,
    })
}

pub fn contacts() -> Result<Vec<Contact>, Error> {
    parse(include_str!("../seed/contacts.json"))
}

pub fn agents() -> Result<Vec<Agent>, Error> {
    parse(include_str!("../seed/agents.json"))
}

pub fn chat_agents() -> Result<Vec<ChatAgent>, Error> {
    parse(include_str!("../seed/chatAgents.json"))
}

pub fn campaigns() -> Result<Vec<Campaign>, Error> {
    parse(include_str!("../seed/broadcastCampaigns.json"))
}

pub fn reply_bots() -> Result<Vec<ReplyBot>, Error> {
    parse(include_str!("../seed/replyBots.json"))
}

pub fn catalogue_items() -> Result<Vec<CatalogueItem>, Error> {
    parse(include_str!("../seed/catalogueItems.json"))
}

pub fn orders() -> Result<Vec<Order>, Error> {
    parse(include_str!("../seed/orders.json"))
}

pub fn integrations() -> Result<Vec<Integration>, Error> {
    parse(include_str!("../seed/integrations.json"))
}

pub fn agency_clients() -> Result<Vec<AgencyClient>, Error> {
    parse(include_str!("../seed/agencyClients.json"))
}

pub fn conversations() -> Result<Vec<Conversation>, Error> {
    parse(include_str!("../seed/chatConversations.json"))
}

/// The "make default labels" set, stamped with `today`.
pub fn default_labels(today: NaiveDate) -> Vec<ContactLabel> {
    [
        ("1", "VIP", "Very Important Person", "#f59e0b"),
        ("2", "Customer", "Regular customer", "#16a34a"),
        ("3", "Lead", "Potential customer", "#3b82f6"),
    ]
    .into_iter()
    .map(|(id, name, description, color)| ContactLabel {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        ai_bot_stop_label: false,
        status: "active".to_string(),
        creation_date: today,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wapi_common::models::IntegrationStatus;

    #[test]
    fn every_seed_file_parses() -> Result<(), Error> {
        assert_eq!(contacts()?.len(), 6);
        assert!(agents()?.is_empty());
        assert_eq!(chat_agents()?.len(), 6);
        assert_eq!(campaigns()?.len(), 2);
        assert_eq!(reply_bots()?.len(), 3);
        assert_eq!(catalogue_items()?.len(), 3);
        assert_eq!(orders()?.len(), 3);
        assert_eq!(agency_clients()?.len(), 3);
        assert_eq!(conversations()?.len(), 6);
        Ok(())
    }

    #[test]
    fn integration_catalog_has_twelve_entries_with_openai_connected() -> Result<(), Error> {
        let all = integrations()?;
        assert_eq!(all.len(), 12);
        let ids: Vec<&str> = all.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"1"));
        assert_eq!(ids.last(), Some(&"12"));

        let connected: Vec<&Integration> =
            all.iter().filter(|i| i.status == IntegrationStatus::Connected).collect();
        assert_eq!(connected.len(), 1);
        assert_eq!(connected[0].name, "Open_AI");
        assert_eq!(connected[0].last_sync.as_deref(), Some("2025-01-14 10:30"));
        Ok(())
    }

    #[test]
    fn default_labels_are_vip_customer_lead() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        let names: Vec<String> = default_labels(day).into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["VIP", "Customer", "Lead"]);
    }
}
