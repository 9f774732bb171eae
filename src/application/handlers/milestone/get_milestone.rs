//! GetMilestoneHandler - Query handler for a single milestone.

use std::sync::Arc;

use crate::domain::foundation::MilestoneId;
use crate::domain::milestone::Milestone;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Query to fetch one milestone.
#[derive(Debug, Clone, Copy)]
pub struct GetMilestoneQuery {
    pub milestone_id: MilestoneId,
}

pub struct GetMilestoneHandler {
    store: Arc<dyn TrackerStore>,
}

impl GetMilestoneHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetMilestoneQuery) -> Result<Milestone, TrackerError> {
        let mut tx = self.store.begin().await?;
        tx.find_milestone(&query.milestone_id)
            .await?
            .ok_or_else(|| TrackerError::milestone_not_found(query.milestone_id))
    }
}
