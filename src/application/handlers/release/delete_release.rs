//! DeleteReleaseHandler - Command handler for removing releases.

use std::sync::Arc;

use crate::application::handlers::log_failure;
use crate::domain::foundation::ReleaseId;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Command to delete a release.
#[derive(Debug, Clone, Copy)]
pub struct DeleteReleaseCommand {
    pub release_id: ReleaseId,
}

/// Handler for deleting releases. An associated release is removed as is;
/// milestones keep no back-reference to clean up.
pub struct DeleteReleaseHandler {
    store: Arc<dyn TrackerStore>,
}

impl DeleteReleaseHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteReleaseCommand) -> Result<(), TrackerError> {
        self.delete(cmd)
            .await
            .inspect_err(|e| log_failure("delete_release", e))
    }

    async fn delete(&self, cmd: DeleteReleaseCommand) -> Result<(), TrackerError> {
        let mut tx = self.store.begin().await?;

        if !tx.delete_release(&cmd.release_id).await? {
            return Err(TrackerError::release_not_found(cmd.release_id));
        }
        tx.commit().await?;

        tracing::info!(release_id = %cmd.release_id, "Release deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTrackerStore;
    use crate::application::handlers::release::{CreateReleaseCommand, CreateReleaseHandler};
    use crate::domain::foundation::Scope;
    use crate::domain::validation::{ReleaseInput, ValidationPolicy};

    #[tokio::test]
    async fn deletes_existing_release_once() {
        let store = Arc::new(InMemoryTrackerStore::new());
        let release = CreateReleaseHandler::new(store.clone(), ValidationPolicy::default())
            .handle(CreateReleaseCommand {
                scope: Scope::Global,
                input: ReleaseInput {
                    version: Some("v1".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        let handler = DeleteReleaseHandler::new(store.clone());
        let cmd = DeleteReleaseCommand {
            release_id: *release.id(),
        };

        handler.handle(cmd).await.unwrap();
        assert_eq!(store.release_count().await, 0);

        let again = handler.handle(cmd).await;
        assert!(matches!(again, Err(TrackerError::NotFound(_))));
    }
}
