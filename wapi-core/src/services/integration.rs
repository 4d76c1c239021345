// src/services/integration.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::Error;
use crate::config::DashboardConfig;
use crate::eventbus::EventBus;
use crate::forms::IntegrationConfigForm;
use crate::services::{Notifier, Paginated};
use crate::utils::time::sync_stamp;
use wapi_common::models::{Integration, IntegrationPatch, IntegrationStatus};
use wapi_common::traits::Repository;

/// Cards shown per page of the integrations grid.
pub const PER_PAGE: usize = 5;

/// Connect, configure, test and sync the entries of the integrations catalog.
///
/// The catalog itself is fixed; only status, config and last sync change.
/// Tests and syncs are simulated with a delay, awaited by the caller.
pub struct IntegrationService {
    repo: Arc<dyn Repository<Integration>>,
    notifier: Notifier,
    test_delay: Duration,
    sync_delay: Duration,
}

impl IntegrationService {
    pub fn new(
        repo: Arc<dyn Repository<Integration>>,
        bus: Option<EventBus>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            repo,
            notifier: Notifier::new(bus),
            test_delay: config.integration_test_delay(),
            sync_delay: config.integration_sync_delay(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Integration>, Error> {
        self.repo.list().await
    }

    pub async fn page(&self, page: usize) -> Result<Paginated<Integration>, Error> {
        Ok(Paginated::new(self.repo.list().await?, page, PER_PAGE))
    }

    async fn find(&self, id: &str) -> Result<Integration, Error> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("integrations '{}'", id)))
    }

    async fn set_status(&self, id: &str, status: IntegrationStatus) -> Result<Vec<Integration>, Error> {
        let patch = IntegrationPatch { status: Some(status), ..Default::default() };
        self.repo.update(id, &patch).await
    }

    /// Mark the integration as being configured and return the prefilled
    /// configure form.
    pub async fn connect(&self, id: &str) -> Result<IntegrationConfigForm, Error> {
        let integration = self.find(id).await?;
        self.set_status(id, IntegrationStatus::Configuring).await?;
        debug!("configuring '{}'", integration.name);
        Ok(IntegrationConfigForm::from_integration(&integration))
    }

    /// Store the configuration and mark the integration connected. Invalid
    /// custom-settings JSON is rejected and changes nothing.
    pub async fn save_config(
        &self,
        id: &str,
        form: IntegrationConfigForm,
    ) -> Result<Vec<Integration>, Error> {
        let integration = self.find(id).await?;
        let config = match form.into_config() {
            Ok(c) => c,
            Err(e) => return Err(self.notifier.rejected(e).await),
        };

        let patch = IntegrationPatch {
            status: Some(IntegrationStatus::Connected),
            config: Some(Some(config)),
            last_sync: Some(Some(sync_stamp(Utc::now()))),
        };
        let items = self.repo.update(id, &patch).await?;
        info!("integration '{}' connected", integration.name);
        self.notifier
            .success(format!("{} configured successfully", integration.name))
            .await;
        Ok(items)
    }

    /// Back to `disconnected`, dropping config and last sync.
    pub async fn disconnect(&self, id: &str) -> Result<Vec<Integration>, Error> {
        let integration = self.find(id).await?;
        let patch = IntegrationPatch {
            status: Some(IntegrationStatus::Disconnected),
            config: Some(None),
            last_sync: Some(None),
        };
        let items = self.repo.update(id, &patch).await?;
        info!("integration '{}' disconnected", integration.name);
        self.notifier.success("Integration disconnected successfully").await;
        Ok(items)
    }

    /// `testing` for the test delay, then `connected`.
    pub async fn test_connection(&self, id: &str) -> Result<Vec<Integration>, Error> {
        self.find(id).await?;
        self.set_status(id, IntegrationStatus::Testing).await?;
        tokio::time::sleep(self.test_delay).await;
        let items = self.set_status(id, IntegrationStatus::Connected).await?;
        self.notifier.success("Connection test successful").await;
        Ok(items)
    }

    /// Stamp `lastSync` once the sync delay has passed.
    pub async fn sync(&self, id: &str) -> Result<Vec<Integration>, Error> {
        let integration = self.find(id).await?;
        self.notifier
            .success(format!("Syncing data for {}...", integration.name))
            .await;
        tokio::time::sleep(self.sync_delay).await;

        let patch = IntegrationPatch {
            last_sync: Some(Some(sync_stamp(Utc::now()))),
            ..Default::default()
        };
        let items = self.repo.update(id, &patch).await?;
        self.notifier
            .success(format!("{} data synced successfully", integration.name))
            .await;
        Ok(items)
    }
}
