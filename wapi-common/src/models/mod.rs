// File: wapi-common/src/models/mod.rs
pub mod agency;
pub mod agent;
pub mod campaign;
pub mod catalogue;
pub mod chat_agent;
pub mod contact;
pub mod conversation;
pub mod ids;
pub mod integration;
pub mod notification;
pub mod reply_bot;
pub mod session;

pub use agency::{AgencyClient, AgencyClientPatch, AgencyStatus, AgencyTier};
pub use agent::{Agent, AgentPatch, AgentRole, AgentStatus};
pub use campaign::{Campaign, CampaignPatch, CampaignStatus};
pub use catalogue::{
    Availability, CatalogueItem, CatalogueItemPatch, ItemCondition, Order, OrderPatch,
    OrderStatus, PaymentStatus,
};
pub use chat_agent::{ChatAgent, ChatAgentPatch, ChatAgentRole, ChatAgentStatus};
pub use contact::{Contact, ContactFilter, ContactLabel, ContactLabelPatch, ContactPatch, ContactStatus};
pub use conversation::{
    Conversation, ConversationPatch, InboxTab, Message, MessageKind, MessageSender,
    MessageStatus, ReplyStatus,
};
pub use integration::{Integration, IntegrationConfig, IntegrationPatch, IntegrationStatus};
pub use notification::{Notification, NotificationLevel};
pub use reply_bot::{BotStatus, BotType, ReplyBot, ReplyBotPatch};
pub use session::{SessionFlags, SessionRecord};

/// Case-insensitive substring test shared by every `matches_search`.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
