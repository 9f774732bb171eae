//! CreateMilestoneHandler - Command handler for creating milestones.

use std::sync::Arc;

use crate::domain::foundation::{today, MilestoneId, Scope};
use crate::domain::milestone::Milestone;
use crate::domain::validation::{MilestoneInput, ValidationPolicy};
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

use crate::application::handlers::log_failure;

/// Command to create a new milestone.
#[derive(Debug, Clone)]
pub struct CreateMilestoneCommand {
    pub scope: Scope,
    pub input: MilestoneInput,
}

/// Handler for creating milestones.
pub struct CreateMilestoneHandler {
    store: Arc<dyn TrackerStore>,
    policy: ValidationPolicy,
}

impl CreateMilestoneHandler {
    pub fn new(store: Arc<dyn TrackerStore>, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, cmd: CreateMilestoneCommand) -> Result<Milestone, TrackerError> {
        self.create(cmd)
            .await
            .inspect_err(|e| log_failure("create_milestone", e))
    }

    async fn create(&self, cmd: CreateMilestoneCommand) -> Result<Milestone, TrackerError> {
        // 1. Validate input (all field errors together)
        let milestone = Milestone::create(MilestoneId::new(), cmd.scope, cmd.input, &self.policy)?;

        let mut tx = self.store.begin().await?;

        // 2. Title must be unique within the scope
        if tx
            .find_milestone_by_title(milestone.title(), &cmd.scope)
            .await?
            .is_some()
        {
            return Err(TrackerError::DuplicateTitle {
                title: milestone.title().to_string(),
                scope: cmd.scope,
            });
        }

        // 3. Due date must not already have passed
        if let Some(due_date) = milestone.due_date() {
            if milestone.is_due_before(today()) {
                return Err(TrackerError::InvalidDueDate { due_date });
            }
        }

        // 4. Persist (the store's unique index is the final guard)
        tx.save_milestone(&milestone).await?;
        tx.commit().await?;

        tracing::info!(
            milestone_id = %milestone.id(),
            scope = %milestone.scope(),
            "Milestone created"
        );

        Ok(milestone)
    }
}
