//! CreateReleaseHandler - Command handler for creating releases.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::{today, ReleaseId, Scope};
use crate::domain::release::Release;
use crate::domain::validation::{ReleaseInput, ValidationPolicy};
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to create a new release.
#[derive(Debug, Clone)]
pub struct CreateReleaseCommand {
    pub scope: Scope,
    pub input: ReleaseInput,
}

/// Handler for creating releases. New releases are never associated.
pub struct CreateReleaseHandler {
    store: Arc<dyn TrackerStore>,
    policy: ValidationPolicy,
}

impl CreateReleaseHandler {
    pub fn new(store: Arc<dyn TrackerStore>, policy: ValidationPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn handle(&self, cmd: CreateReleaseCommand) -> Result<Release, TrackerError> {
        self.create(cmd)
            .await
            .inspect_err(|e| log_failure("create_release", e))
    }

    async fn create(&self, cmd: CreateReleaseCommand) -> Result<Release, TrackerError> {
        // 1. Validate input
        let release = Release::create(ReleaseId::new(), cmd.scope, cmd.input, &self.policy, today())?;

        let mut tx = self.store.begin().await?;

        // 2. Version must be unique within the scope
        if tx
            .find_release_by_version(release.version(), &cmd.scope)
            .await?
            .is_some()
        {
            return Err(TrackerError::DuplicateVersion {
                version: release.version().to_string(),
                scope: cmd.scope,
            });
        }

        // 3. Persist
        tx.save_release(&release).await?;
        tx.commit().await?;

        tracing::info!(
            release_id = %release.id(),
            version = release.version(),
            scope = %release.scope(),
            "Release created"
        );

        Ok(release)
    }
}
