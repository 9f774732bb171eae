//! DisassociateReleaseHandler - Unlinks a release from its milestone.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::{MilestoneId, ReleaseId};
use crate::domain::release::Release;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to unlink a release from the named milestone.
#[derive(Debug, Clone, Copy)]
pub struct DisassociateReleaseCommand {
    pub release_id: ReleaseId,
    pub milestone_id: MilestoneId,
}

pub struct DisassociateReleaseHandler {
    store: Arc<dyn TrackerStore>,
}

impl DisassociateReleaseHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DisassociateReleaseCommand) -> Result<Release, TrackerError> {
        self.disassociate(cmd)
            .await
            .inspect_err(|e| log_failure("disassociate_release", e))
    }

    async fn disassociate(&self, cmd: DisassociateReleaseCommand) -> Result<Release, TrackerError> {
        let mut tx = self.store.begin().await?;

        // 1. Load release
        let mut release = tx
            .find_release(&cmd.release_id)
            .await?
            .ok_or_else(|| TrackerError::release_not_found(cmd.release_id))?;

        // 2. Must be linked to exactly this milestone
        release.disassociate(cmd.milestone_id)?;

        // 3. Persist; the milestone's updated_at moves too if it still exists
        tx.save_release(&release).await?;
        if let Some(mut milestone) = tx.find_milestone(&cmd.milestone_id).await? {
            milestone.touch();
            tx.save_milestone(&milestone).await?;
        }
        tx.commit().await?;

        tracing::info!(
            release_id = %cmd.release_id,
            milestone_id = %cmd.milestone_id,
            "Release disassociated"
        );

        Ok(release)
    }
}
