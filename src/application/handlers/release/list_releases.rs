//! ListReleasesHandler - Query handler for filtered release listings.

use std::sync::Arc;

use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::{ReleaseFilter, TrackerStore};

pub struct ListReleasesHandler {
    store: Arc<dyn TrackerStore>,
}

impl ListReleasesHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Releases matching `filter`, oldest first.
    pub async fn handle(&self, filter: ReleaseFilter) -> Result<Vec<Release>, TrackerError> {
        let mut tx = self.store.begin().await?;
        Ok(tx.list_releases(&filter).await?)
    }
}
