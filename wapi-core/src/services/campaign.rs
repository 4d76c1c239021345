// src/services/campaign.rs

use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use crate::Error;
use crate::eventbus::EventBus;
use crate::services::{CrudService, Toasts};
use wapi_common::models::{Campaign, CampaignPatch, CampaignStatus};
use wapi_common::traits::Repository;

const TOASTS: Toasts = Toasts {
    created: "Campaign created successfully!",
    updated: "Campaign updated successfully!",
    deleted: "Campaign deleted successfully!",
    duplicated: "Campaign duplicated successfully!",
};

pub struct CampaignService {
    crud: CrudService<Campaign>,
}

impl CampaignService {
    pub fn new(repo: Arc<dyn Repository<Campaign>>, bus: Option<EventBus>) -> Self {
        Self { crud: CrudService::new(repo, bus, TOASTS) }
    }

    /// Move a campaign to `status` directly, e.g. pausing an active send.
    pub async fn set_status(&self, id: &str, status: CampaignStatus) -> Result<Vec<Campaign>, Error> {
        let patch = CampaignPatch { status: Some(status), ..Default::default() };
        let items = self.crud.repo().update(id, &patch).await?;
        info!("campaign {} -> {}", id, status);
        self.crud
            .notifier()
            .success(format!("Campaign status updated to {}", status))
            .await;
        Ok(items)
    }

    /// Delivery and read rates in percent, for the campaign table.
    pub fn rates(campaign: &Campaign) -> (f64, f64) {
        if campaign.contacts == 0 {
            return (0.0, 0.0);
        }
        let total = f64::from(campaign.contacts);
        (
            f64::from(campaign.delivered_to) * 100.0 / total,
            f64::from(campaign.read_by) * 100.0 / total,
        )
    }
}

impl Deref for CampaignService {
    type Target = CrudService<Campaign>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}
