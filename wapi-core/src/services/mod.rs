//! Page-level actions on top of the collection repositories.
//!
//! Every service owns the repository of its page and, optionally, an event bus
//! on which it posts the toasts the operator sees after each action.

pub mod agency;
pub mod agent;
pub mod campaign;
pub mod catalogue;
pub mod chat_agent;
pub mod contacts;
pub mod crud;
pub mod inbox;
pub mod integration;
pub mod listing;
pub mod reply_bot;

pub use agency::{AgencyService, AgencyStats};
pub use agent::{AgentService, AgentStats};
pub use campaign::CampaignService;
pub use catalogue::{CatalogueService, OrderFilter, OrderService};
pub use chat_agent::{ChatAgentService, ChatAgentStats};
pub use contacts::{ContactLabelService, ContactService};
pub use crud::{CrudService, Toasts};
pub use inbox::InboxService;
pub use integration::IntegrationService;
pub use listing::Paginated;
pub use reply_bot::{BotFilter, ReplyBotService};

use tracing::warn;

use crate::Error;
use crate::eventbus::EventBus;
use wapi_common::models::Notification;

/// Optional toast sink shared by the services.
#[derive(Clone, Default)]
pub struct Notifier {
    bus: Option<EventBus>,
}

impl Notifier {
    pub fn new(bus: Option<EventBus>) -> Self {
        Self { bus }
    }

    pub async fn send(&self, n: Notification) {
        if let Some(bus) = &self.bus {
            bus.notify(n).await;
        }
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.send(Notification::success(message)).await;
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.send(Notification::info(message)).await;
    }

    /// Toast a rejected submit and hand the error back.
    pub async fn rejected(&self, err: Error) -> Error {
        let text = match &err {
            Error::Validation { missing } => {
                warn!("form rejected, missing {:?}", missing);
                err.to_string()
            }
            Error::Parse(msg) => {
                warn!("form rejected: {}", msg);
                msg.clone()
            }
            other => other.to_string(),
        };
        self.send(Notification::error(text)).await;
        err
    }
}
