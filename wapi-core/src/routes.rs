//! Fixed path table of the dashboard.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
    PhoneNumbers,
    Brand,
    CreateBrand,
    Contacts,
    ContactsImport,
    ContactLabels,
    GroupsManagement,
    Templates,
    BroadcastCampaigns,
    ChatsInbox,
    ReplyBots,
    WhatsAppFlows,
    CommerceCatalogue,
    Integrations,
    AgencyReseller,
    ChatAgents,
    AgentManagement,
    WapiSettings,
    Api,
}

impl Page {
    pub const ALL: [Page; 21] = [
        Page::Login,
        Page::Dashboard,
        Page::PhoneNumbers,
        Page::Brand,
        Page::CreateBrand,
        Page::Contacts,
        Page::ContactsImport,
        Page::ContactLabels,
        Page::GroupsManagement,
        Page::Templates,
        Page::BroadcastCampaigns,
        Page::ChatsInbox,
        Page::ReplyBots,
        Page::WhatsAppFlows,
        Page::CommerceCatalogue,
        Page::Integrations,
        Page::AgencyReseller,
        Page::ChatAgents,
        Page::AgentManagement,
        Page::WapiSettings,
        Page::Api,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/",
            Page::Dashboard => "/dashboard",
            Page::PhoneNumbers => "/phone-numbers",
            Page::Brand => "/brand",
            Page::CreateBrand => "/create-brand",
            Page::Contacts => "/contacts",
            Page::ContactsImport => "/contacts-import",
            Page::ContactLabels => "/contact-labels",
            Page::GroupsManagement => "/groups-management",
            Page::Templates => "/templates",
            Page::BroadcastCampaigns => "/broadcast-campaigns",
            Page::ChatsInbox => "/chats-inbox",
            Page::ReplyBots => "/reply-bots",
            Page::WhatsAppFlows => "/whatsapp-flows",
            Page::CommerceCatalogue => "/commerce-catalogue",
            Page::Integrations => "/integrations",
            Page::AgencyReseller => "/agency-reseller",
            Page::ChatAgents => "/chat-agents",
            Page::AgentManagement => "/agent-management",
            Page::WapiSettings => "/wapi-settings",
            Page::Api => "/api",
        }
    }

    /// Only the login page is reachable without a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Page::Login)
    }

    /// Storage key of the collection this page owns, if any.
    pub fn storage_key(&self) -> Option<&'static str> {
        match self {
            Page::Contacts => Some("contacts"),
            Page::ContactLabels => Some("contactLabels"),
            Page::BroadcastCampaigns => Some("broadcastCampaigns"),
            Page::ChatsInbox => Some("chatConversations"),
            Page::ReplyBots => Some("replyBots"),
            Page::CommerceCatalogue => Some("catalogueItems"),
            Page::Integrations => Some("integrations"),
            Page::AgencyReseller => Some("agencyClients"),
            Page::ChatAgents => Some("chatAgents"),
            Page::AgentManagement => Some("agents"),
            _ => None,
        }
    }

    /// Resolve a request path. Query strings, fragments and a trailing slash
    /// are ignored; anything outside the table is `None`.
    pub fn resolve(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Page::ALL.iter().copied().find(|p| p.path() == path)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Page {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::resolve(s).ok_or_else(|| format!("Unknown route: {}", s))
    }
}
