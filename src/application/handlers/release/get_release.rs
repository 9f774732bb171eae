//! GetReleaseHandler - Query handler for a single release.

use std::sync::Arc;

use crate::domain::foundation::ReleaseId;
use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Query to fetch one release.
#[derive(Debug, Clone, Copy)]
pub struct GetReleaseQuery {
    pub release_id: ReleaseId,
}

pub struct GetReleaseHandler {
    store: Arc<dyn TrackerStore>,
}

impl GetReleaseHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetReleaseQuery) -> Result<Release, TrackerError> {
        let mut tx = self.store.begin().await?;
        tx.find_release(&query.release_id)
            .await?
            .ok_or_else(|| TrackerError::release_not_found(query.release_id))
    }
}
