//! AssociateReleaseHandler - Links a release to an in-progress milestone.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::{MilestoneId, ReleaseId};
use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to link a release to a milestone.
#[derive(Debug, Clone, Copy)]
pub struct AssociateReleaseCommand {
    pub release_id: ReleaseId,
    pub milestone_id: MilestoneId,
}

/// Handler for associating releases with milestones.
///
/// A release links to at most one milestone at a time; moving it requires an
/// explicit disassociation first. Only `IN_PROGRESS` milestones accept releases.
pub struct AssociateReleaseHandler {
    store: Arc<dyn TrackerStore>,
}

impl AssociateReleaseHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AssociateReleaseCommand) -> Result<Release, TrackerError> {
        self.associate(cmd)
            .await
            .inspect_err(|e| log_failure("associate_release", e))
    }

    async fn associate(&self, cmd: AssociateReleaseCommand) -> Result<Release, TrackerError> {
        let mut tx = self.store.begin().await?;

        // 1. Load release
        let mut release = tx
            .find_release(&cmd.release_id)
            .await?
            .ok_or_else(|| TrackerError::release_not_found(cmd.release_id))?;

        // 2. Load milestone
        let mut milestone = tx
            .find_milestone(&cmd.milestone_id)
            .await?
            .ok_or_else(|| TrackerError::milestone_not_found(cmd.milestone_id))?;

        // 3. Milestone must accept releases
        if !milestone.accepts_releases() {
            return Err(TrackerError::InvalidMilestoneState {
                milestone_id: cmd.milestone_id,
                state: milestone.state(),
            });
        }

        // 4. Link (fails if already linked anywhere)
        release.associate(cmd.milestone_id)?;
        milestone.touch();

        // 5. Persist both
        tx.save_release(&release).await?;
        tx.save_milestone(&milestone).await?;
        tx.commit().await?;

        tracing::info!(
            release_id = %cmd.release_id,
            milestone_id = %cmd.milestone_id,
            "Release associated"
        );

        Ok(release)
    }
}
