// src/services/inbox.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::Error;
use crate::config::DashboardConfig;
use crate::eventbus::EventBus;
use crate::repositories::CollectionRepository;
use crate::services::{Notifier, listing};
use crate::utils::time::next_timestamp_id;
use wapi_common::models::{
    Conversation, ConversationPatch, InboxTab, Message, MessageKind, MessageSender, MessageStatus,
};
use wapi_common::traits::Repository;

/// Result of sending a message: the inbox as it stands right after the send,
/// and the task that later marks the message delivered and then read.
pub struct SentMessage {
    pub conversations: Vec<Conversation>,
    pub message_id: String,
    pub receipts: JoinHandle<()>,
}

/// The chats inbox.
pub struct InboxService {
    repo: Arc<CollectionRepository<Conversation>>,
    notifier: Notifier,
    delivery_delay: Duration,
    read_delay: Duration,
}

impl InboxService {
    pub fn new(
        repo: Arc<CollectionRepository<Conversation>>,
        bus: Option<EventBus>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            repo,
            notifier: Notifier::new(bus),
            delivery_delay: config.delivery_delay(),
            read_delay: config.read_delay(),
        }
    }

    /// Conversations in `tab`, narrowed by `term`.
    pub async fn conversations(&self, tab: InboxTab, term: &str) -> Result<Vec<Conversation>, Error> {
        let in_tab: Vec<Conversation> =
            self.repo.list().await?.into_iter().filter(|c| c.in_tab(tab)).collect();
        Ok(listing::search(in_tab, term))
    }

    /// Badge counts for the all / mine / new tabs.
    pub async fn tab_counts(&self) -> Result<[(InboxTab, usize); 3], Error> {
        let all = self.repo.list().await?;
        Ok([InboxTab::All, InboxTab::Mine, InboxTab::New]
            .map(|tab| (tab, all.iter().filter(|c| c.in_tab(tab)).count())))
    }

    async fn find(&self, id: &str) -> Result<Conversation, Error> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("chatConversations '{}'", id)))
    }

    pub async fn toggle_star(&self, id: &str) -> Result<Vec<Conversation>, Error> {
        let conv = self.find(id).await?;
        let patch = ConversationPatch { has_star: Some(!conv.has_star), ..Default::default() };
        let items = self.repo.update(id, &patch).await?;
        self.notifier
            .success(if conv.has_star { "Removed from starred" } else { "Added to starred" })
            .await;
        Ok(items)
    }

    pub async fn archive(&self, id: &str) -> Result<Vec<Conversation>, Error> {
        let patch = ConversationPatch { is_archived: Some(true), ..Default::default() };
        let items = self.repo.update(id, &patch).await?;
        self.notifier.success("Conversation archived").await;
        Ok(items)
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<Conversation>, Error> {
        let items = self.repo.remove(id).await?;
        self.notifier.success("Conversation deleted").await;
        Ok(items)
    }

    pub async fn mark_read(&self, id: &str) -> Result<Vec<Conversation>, Error> {
        let patch = ConversationPatch { unread_count: Some(0), ..Default::default() };
        self.repo.update(id, &patch).await
    }

    /// Append an outgoing text message as `sent`, then flip it to `delivered`
    /// and `read` after the configured delays. A blank message is ignored.
    pub async fn send_message(&self, id: &str, text: &str) -> Result<Option<SentMessage>, Error> {
        let content = text.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let message = Message {
            id: next_timestamp_id(),
            content: content.to_string(),
            sender: MessageSender::User,
            timestamp: Utc::now().to_rfc3339(),
            status: MessageStatus::Sent,
            kind: MessageKind::Text,
        };
        let message_id = message.id.clone();

        let conversations = self
            .repo
            .modify(id, move |conv| {
                conv.last_message = message.content.clone();
                conv.timestamp = "now".to_string();
                conv.unread_count = 0;
                conv.messages.push(message);
            })
            .await?;
        info!("message {} sent to conversation {}", message_id, id);
        self.notifier.success("Message sent!").await;

        let receipts = tokio::spawn(simulate_receipts(
            Arc::clone(&self.repo),
            id.to_string(),
            message_id.clone(),
            self.delivery_delay,
            self.read_delay,
        ));

        Ok(Some(SentMessage { conversations, message_id, receipts }))
    }
}

/// Both delays count from the send. Status never moves backwards.
async fn simulate_receipts(
    repo: Arc<CollectionRepository<Conversation>>,
    conversation_id: String,
    message_id: String,
    delivery_delay: Duration,
    read_delay: Duration,
) {
    tokio::time::sleep(delivery_delay).await;
    if !advance(&repo, &conversation_id, &message_id, MessageStatus::Delivered).await {
        return;
    }
    tokio::time::sleep(read_delay.saturating_sub(delivery_delay)).await;
    advance(&repo, &conversation_id, &message_id, MessageStatus::Read).await;
}

async fn advance(
    repo: &CollectionRepository<Conversation>,
    conversation_id: &str,
    message_id: &str,
    status: MessageStatus,
) -> bool {
    let result = repo
        .modify(conversation_id, |conv| {
            if let Some(m) = conv.message_mut(message_id) {
                m.status = m.status.max(status);
            }
        })
        .await;
    match result {
        Ok(_) => true,
        Err(e) => {
            // the conversation was deleted, or storage went away
            debug!("receipt for message {} dropped: {}", message_id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use crate::seed;

    fn service() -> Result<(InboxService, Arc<CollectionRepository<Conversation>>), Error> {
        let repo = Arc::new(CollectionRepository::new(
            Arc::new(InMemoryStore::new()),
            seed::conversations()?,
        ));
        let svc = InboxService::new(Arc::clone(&repo), None, &DashboardConfig::default());
        Ok((svc, repo))
    }

    #[tokio::test]
    async fn tab_counts_follow_reply_window_and_archive() -> Result<(), Error> {
        let (svc, _) = service()?;
        assert_eq!(
            svc.tab_counts().await?,
            [(InboxTab::All, 6), (InboxTab::Mine, 0), (InboxTab::New, 4)]
        );

        svc.archive("2").await?;
        assert_eq!(
            svc.tab_counts().await?,
            [(InboxTab::All, 5), (InboxTab::Mine, 0), (InboxTab::New, 3)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn search_narrows_the_tab() -> Result<(), Error> {
        let (svc, _) = service()?;
        let hits = svc.conversations(InboxTab::All, "maaz").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
        Ok(())
    }

    #[tokio::test]
    async fn blank_message_is_ignored() -> Result<(), Error> {
        let (svc, repo) = service()?;
        let before = repo.list().await?;
        assert!(svc.send_message("2", "   ").await?.is_none());
        assert_eq!(repo.list().await?, before);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn sent_message_is_delivered_then_read() -> Result<(), Error> {
        let (svc, repo) = service()?;
        let sent = svc.send_message("2", " On my way ").await?.unwrap();

        let conv = sent.conversations.iter().find(|c| c.id == "2").unwrap();
        assert_eq!(conv.last_message, "On my way");
        assert_eq!(conv.unread_count, 0);
        assert_eq!(conv.messages.last().unwrap().status, MessageStatus::Sent);

        sent.receipts.await.unwrap();
        let mut conv = repo.get("2").await?.unwrap();
        assert_eq!(conv.message_mut(&sent.message_id).unwrap().status, MessageStatus::Read);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn receipts_stop_quietly_when_the_conversation_is_deleted() -> Result<(), Error> {
        let (svc, repo) = service()?;
        let sent = svc.send_message("3", "hello").await?.unwrap();
        svc.delete("3").await?;
        sent.receipts.await.unwrap();
        assert!(repo.get("3").await?.is_none());
        Ok(())
    }
}
