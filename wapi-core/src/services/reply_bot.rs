// src/services/reply_bot.rs

use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, info};

use crate::Error;
use crate::eventbus::EventBus;
use crate::services::{CrudService, Toasts};
use crate::utils::time::today;
use wapi_common::models::{BotStatus, BotType, ReplyBot, ReplyBotPatch};
use wapi_common::traits::Repository;

const TOASTS: Toasts = Toasts {
    created: "Bot created successfully!",
    updated: "Bot updated successfully!",
    deleted: "Bot deleted successfully!",
    duplicated: "Bot duplicated successfully!",
};

/// The filter bar above the bot table. Blank fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotFilter {
    pub name: String,
    pub bot_type: Option<BotType>,
    /// Substring of the `YYYY-MM-DD` creation date.
    pub date: String,
}

impl BotFilter {
    pub fn matches(&self, bot: &ReplyBot) -> bool {
        bot.name.to_lowercase().contains(&self.name.to_lowercase())
            && self.bot_type.is_none_or(|t| bot.bot_type == t)
            && bot.created_at.to_string().contains(self.date.trim())
    }
}

pub struct ReplyBotService {
    crud: CrudService<ReplyBot>,
}

impl ReplyBotService {
    pub fn new(repo: Arc<dyn Repository<ReplyBot>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, TOASTS) }
    }

    pub async fn filter(&self, filter: &BotFilter) -> Result<Vec<ReplyBot>, Error> {
        let bots = self.crud.list().await?;
        Ok(bots.into_iter().filter(|b| filter.matches(b)).collect())
    }

    /// Flip `enabled`. Enabling marks the bot active and stamps today as its
    /// last activity; disabling only marks it inactive.
    pub async fn toggle(&self, id: &str) -> Result<Vec<ReplyBot>, Error> {
        let bot = self
            .crud
            .repo()
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("replyBots '{}'", id)))?;

        let enable = !bot.enabled;
        let patch = ReplyBotPatch {
            enabled: Some(enable),
            status: Some(if enable { BotStatus::Active } else { BotStatus::Inactive }),
            last_active: enable.then(|| today().to_string()),
            ..Default::default()
        };
        let items = self.crud.repo().update(id, &patch).await?;
        info!("bot '{}' {}", bot.name, if enable { "enabled" } else { "disabled" });
        self.crud.notifier().success("Bot status updated!").await;
        Ok(items)
    }

    /// The first enabled bot whose keywords occur in `text`.
    pub async fn responder_for(&self, text: &str) -> Result<Option<ReplyBot>, Error> {
        let hit = self.crud.list().await?.into_iter().find(|b| b.is_triggered_by(text));
        if let Some(bot) = &hit {
            debug!("'{}' answers '{}'", bot.name, text);
        }
        Ok(hit)
    }
}

impl Deref for ReplyBotService {
    type Target = CrudService<ReplyBot>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{CollectionRepository, InMemoryStore};
    use crate::seed;

    fn service() -> Result<ReplyBotService, Error> {
        let repo = CollectionRepository::new(Arc::new(InMemoryStore::new()), seed::reply_bots()?);
        Ok(ReplyBotService::new(Arc::new(repo), None))
    }

    #[tokio::test]
    async fn toggling_twice_restores_enabled_but_not_status() -> Result<(), Error> {
        let svc = service()?;
        let bot = svc.list().await?.into_iter().find(|b| b.enabled).unwrap();

        let off = svc.toggle(&bot.id).await?;
        let off = off.iter().find(|b| b.id == bot.id).unwrap();
        assert!(!off.enabled);
        assert_eq!(off.status, BotStatus::Inactive);
        assert_eq!(off.last_active, bot.last_active);

        let on = svc.toggle(&bot.id).await?;
        let on = on.iter().find(|b| b.id == bot.id).unwrap();
        assert!(on.enabled);
        assert_eq!(on.status, BotStatus::Active);
        assert_eq!(on.last_active, today().to_string());
        Ok(())
    }

    #[tokio::test]
    async fn filter_combines_name_type_and_date() -> Result<(), Error> {
        let svc = service()?;
        let all = svc.filter(&BotFilter::default()).await?;
        assert_eq!(all.len(), 3);

        let welcome = svc
            .filter(&BotFilter { bot_type: Some(BotType::Welcome), ..Default::default() })
            .await?;
        assert!(welcome.iter().all(|b| b.bot_type == BotType::Welcome));

        let none = svc
            .filter(&BotFilter { date: "1999".into(), ..Default::default() })
            .await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn toggle_of_unknown_bot_is_not_found() -> Result<(), Error> {
        let svc = service()?;
        assert!(matches!(svc.toggle("missing").await, Err(Error::NotFound(_))));
        Ok(())
    }
}
