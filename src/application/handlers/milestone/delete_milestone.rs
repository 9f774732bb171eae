//! DeleteMilestoneHandler - Command handler for removing milestones.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::MilestoneId;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to delete a milestone.
#[derive(Debug, Clone, Copy)]
pub struct DeleteMilestoneCommand {
    pub milestone_id: MilestoneId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMilestoneResult {
    /// Number of releases whose milestone link was cleared.
    pub detached_releases: u64,
}

/// Handler for deleting milestones.
///
/// Linked releases are kept and lose their milestone reference.
pub struct DeleteMilestoneHandler {
    store: Arc<dyn TrackerStore>,
}

impl DeleteMilestoneHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteMilestoneCommand,
    ) -> Result<DeleteMilestoneResult, TrackerError> {
        self.delete(cmd)
            .await
            .inspect_err(|e| log_failure("delete_milestone", e))
    }

    async fn delete(&self, cmd: DeleteMilestoneCommand) -> Result<DeleteMilestoneResult, TrackerError> {
        let mut tx = self.store.begin().await?;

        // 1. Milestone must exist
        if tx.find_milestone(&cmd.milestone_id).await?.is_none() {
            return Err(TrackerError::milestone_not_found(cmd.milestone_id));
        }

        // 2. Unlink releases, then remove
        let detached_releases = tx.detach_releases(&cmd.milestone_id).await?;
        tx.delete_milestone(&cmd.milestone_id).await?;
        tx.commit().await?;

        tracing::info!(
            milestone_id = %cmd.milestone_id,
            detached_releases,
            "Milestone deleted"
        );

        Ok(DeleteMilestoneResult { detached_releases })
    }
}
