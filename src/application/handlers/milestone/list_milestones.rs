//! ListMilestonesHandler - Query handler for filtered milestone listings.

use std::sync::Arc;

use crate::domain::milestone::Milestone;
use crate::domain::TrackerError;
use crate::ports::{MilestoneFilter, TrackerStore};

pub struct ListMilestonesHandler {
    store: Arc<dyn TrackerStore>,
}

impl ListMilestonesHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Milestones matching `filter`, oldest first.
    pub async fn handle(&self, filter: MilestoneFilter) -> Result<Vec<Milestone>, TrackerError> {
        let mut tx = self.store.begin().await?;
        Ok(tx.list_milestones(&filter).await?)
    }
}
