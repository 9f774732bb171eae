//! ListMilestoneReleasesHandler - The derived set of releases linked to a milestone.

use std::sync::Arc;

use crate::domain::foundation::MilestoneId;
use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::{ReleaseFilter, TrackerStore};

/// Query for every release linked to one milestone.
#[derive(Debug, Clone, Copy)]
pub struct ListMilestoneReleasesQuery {
    pub milestone_id: MilestoneId,
}

pub struct ListMilestoneReleasesHandler {
    store: Arc<dyn TrackerStore>,
}

impl ListMilestoneReleasesHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListMilestoneReleasesQuery) -> Result<Vec<Release>, TrackerError> {
        let mut tx = self.store.begin().await?;

        if tx.find_milestone(&query.milestone_id).await?.is_none() {
            return Err(TrackerError::milestone_not_found(query.milestone_id));
        }

        let filter = ReleaseFilter::default().for_milestone(query.milestone_id);
        Ok(tx.list_releases(&filter).await?)
    }
}
