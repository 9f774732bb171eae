//! AssociateReleasesHandler - Links a batch of releases to one milestone, all or nothing.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::{MilestoneId, ReleaseId};
use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::{ReleaseFilter, TrackerStore};

/// Command to link several releases to one milestone.
#[derive(Debug, Clone)]
pub struct AssociateReleasesCommand {
    pub milestone_id: MilestoneId,
    pub release_ids: Vec<ReleaseId>,
}

/// Handler for batch association.
///
/// Every release is checked the same way a single association is. Releases
/// already linked to this milestone are left as they are. If any release fails,
/// nothing is written. Releases are never unlinked by this command.
pub struct AssociateReleasesHandler {
    store: Arc<dyn TrackerStore>,
}

impl AssociateReleasesHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// Returns every release linked to the milestone once the batch is applied.
    pub async fn handle(&self, cmd: AssociateReleasesCommand) -> Result<Vec<Release>, TrackerError> {
        self.associate_all(cmd)
            .await
            .inspect_err(|e| log_failure("associate_releases", e))
    }

    async fn associate_all(&self, cmd: AssociateReleasesCommand) -> Result<Vec<Release>, TrackerError> {
        let mut release_ids = cmd.release_ids;
        release_ids.sort_by_key(|id| *id.as_uuid());
        release_ids.dedup();

        let mut tx = self.store.begin().await?;

        // 1. Load releases first, in id order, so row locks are taken in the
        //    same order as single associations (release, then milestone)
        let mut releases = Vec::with_capacity(release_ids.len());
        let mut missing = None;
        for id in &release_ids {
            match tx.find_release(id).await? {
                Some(release) => releases.push(release),
                None => {
                    missing = Some(*id);
                    break;
                }
            }
        }

        // 2. Load milestone (reported before any missing release)
        let mut milestone = tx
            .find_milestone(&cmd.milestone_id)
            .await?
            .ok_or_else(|| TrackerError::milestone_not_found(cmd.milestone_id))?;
        if let Some(id) = missing {
            return Err(TrackerError::release_not_found(id));
        }

        // 3. Milestone must accept releases
        if !milestone.accepts_releases() {
            return Err(TrackerError::InvalidMilestoneState {
                milestone_id: cmd.milestone_id,
                state: milestone.state(),
            });
        }

        // 4. Link each release not already on this milestone
        let mut linked = 0usize;
        for release in &mut releases {
            if release.milestone_id() == Some(cmd.milestone_id) {
                continue;
            }
            release.associate(cmd.milestone_id)?;
            tx.save_release(release).await?;
            linked += 1;
        }

        // 5. Persist
        if linked > 0 {
            milestone.touch();
            tx.save_milestone(&milestone).await?;
        }
        let filter = ReleaseFilter::default().for_milestone(cmd.milestone_id);
        let all = tx.list_releases(&filter).await?;
        tx.commit().await?;

        tracing::info!(
            milestone_id = %cmd.milestone_id,
            requested = release_ids.len(),
            linked,
            "Releases associated"
        );

        Ok(all)
    }
}
