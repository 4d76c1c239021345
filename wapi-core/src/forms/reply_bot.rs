use chrono::NaiveDate;

use super::{EntityForm, split_list};
use wapi_common::models::{BotStatus, BotType, ReplyBot, ReplyBotPatch};

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyBotForm {
    pub name: String,
    pub description: String,
    pub bot_type: BotType,
    pub response_message: String,
    pub keywords: String,
    pub trigger_conditions: String,
}

impl Default for ReplyBotForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            bot_type: BotType::Welcome,
            response_message: String::new(),
            keywords: String::new(),
            trigger_conditions: String::new(),
        }
    }
}

impl ReplyBotForm {
    pub fn from_bot(bot: &ReplyBot) -> Self {
        Self {
            name: bot.name.clone(),
            description: bot.description.clone(),
            bot_type: bot.bot_type,
            response_message: bot.response_message.clone(),
            keywords: bot.keywords.join(", "),
            trigger_conditions: bot.trigger_conditions.join(", "),
        }
    }
}

impl EntityForm for ReplyBotForm {
    type Entity = ReplyBot;

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("name", &self.name),
            ("description", &self.description),
            ("responseMessage", &self.response_message),
        ]
    }

    /// New bots start as disabled drafts that have never fired.
    fn into_new(self, today: NaiveDate) -> ReplyBot {
        ReplyBot {
            id: String::new(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            bot_type: self.bot_type,
            status: BotStatus::Draft,
            triggers: 0,
            responses: 0,
            last_active: "Never".to_string(),
            created_at: today,
            enabled: false,
            keywords: split_list(&self.keywords),
            response_message: self.response_message.trim().to_string(),
            trigger_conditions: split_list(&self.trigger_conditions),
        }
    }

    fn into_patch(self) -> ReplyBotPatch {
        ReplyBotPatch {
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            bot_type: Some(self.bot_type),
            keywords: Some(split_list(&self.keywords)),
            response_message: Some(self.response_message.trim().to_string()),
            trigger_conditions: Some(split_list(&self.trigger_conditions)),
            ..Default::default()
        }
    }
}
