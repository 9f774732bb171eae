//! TransitionMilestoneHandler - Command handler for milestone lifecycle moves.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::MilestoneId;
use crate::domain::milestone::{Milestone, MilestoneState};
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to move a milestone to another state.
#[derive(Debug, Clone, Copy)]
pub struct TransitionMilestoneCommand {
    pub milestone_id: MilestoneId,
    pub target: MilestoneState,
}

/// Handler for milestone state transitions.
///
/// Only `CREATED -> IN_PROGRESS` and `IN_PROGRESS -> COMPLETED` are accepted.
pub struct TransitionMilestoneHandler {
    store: Arc<dyn TrackerStore>,
}

impl TransitionMilestoneHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: TransitionMilestoneCommand) -> Result<Milestone, TrackerError> {
        self.transition(cmd)
            .await
            .inspect_err(|e| log_failure("transition_milestone", e))
    }

    async fn transition(&self, cmd: TransitionMilestoneCommand) -> Result<Milestone, TrackerError> {
        let mut tx = self.store.begin().await?;

        // 1. Load milestone
        let mut milestone = tx
            .find_milestone(&cmd.milestone_id)
            .await?
            .ok_or_else(|| TrackerError::milestone_not_found(cmd.milestone_id))?;
        let from = milestone.state();

        // 2. Apply the lifecycle move
        milestone
            .transition_to(cmd.target)
            .map_err(|e| TrackerError::invalid_transition(cmd.milestone_id, e))?;

        // 3. Persist
        tx.save_milestone(&milestone).await?;
        tx.commit().await?;

        tracing::info!(
            milestone_id = %cmd.milestone_id,
            from = %from,
            to = %cmd.target,
            "Milestone transitioned"
        );

        Ok(milestone)
    }
}
