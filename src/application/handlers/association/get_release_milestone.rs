//! GetReleaseMilestoneHandler - Resolves the milestone a release points at.

use std::sync::Arc;

use crate::domain::foundation::ReleaseId;
use crate::domain::milestone::Milestone;
use crate::domain::TrackerError;
use crate::ports::TrackerStore;

/// Query for the milestone of one release.
#[derive(Debug, Clone, Copy)]
pub struct GetReleaseMilestoneQuery {
    pub release_id: ReleaseId,
}

pub struct GetReleaseMilestoneHandler {
    store: Arc<dyn TrackerStore>,
}

impl GetReleaseMilestoneHandler {
    pub fn new(store: Arc<dyn TrackerStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// - `NotFound(release)` if the release does not exist
    /// - `NotAssociated` if the release has no milestone
    /// - `NotFound(milestone)` if the stored reference is stale
    pub async fn handle(&self, query: GetReleaseMilestoneQuery) -> Result<Milestone, TrackerError> {
        let mut tx = self.store.begin().await?;

        let release = tx
            .find_release(&query.release_id)
            .await?
            .ok_or_else(|| TrackerError::release_not_found(query.release_id))?;

        let milestone_id = release.milestone_id().ok_or(TrackerError::NotAssociated {
            release_id: query.release_id,
            milestone_id: None,
        })?;

        tx.find_milestone(&milestone_id)
            .await?
            .ok_or_else(|| TrackerError::milestone_not_found(milestone_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTrackerStore;
    use crate::application::handlers::association::{
        AssociateReleaseCommand, AssociateReleaseHandler,
    };
    use crate::application::handlers::milestone::{
        CreateMilestoneCommand, CreateMilestoneHandler, TransitionMilestoneCommand,
        TransitionMilestoneHandler,
    };
    use crate::application::handlers::release::{CreateReleaseCommand, CreateReleaseHandler};
    use crate::domain::foundation::{MilestoneId, Scope, Timestamp};
    use crate::domain::milestone::MilestoneState;
    use crate::domain::release::Release;
    use crate::domain::validation::{MilestoneInput, ReleaseInput, ValidationPolicy};
    use crate::domain::EntityRef;
    use crate::ports::ReleaseRepository;

    async fn release(store: &Arc<InMemoryTrackerStore>) -> Release {
        CreateReleaseHandler::new(store.clone(), ValidationPolicy::default())
            .handle(CreateReleaseCommand {
                scope: Scope::Global,
                input: ReleaseInput {
                    version: Some("v1".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn returns_linked_milestone() {
        let store = Arc::new(InMemoryTrackerStore::new());
        let milestone = CreateMilestoneHandler::new(store.clone(), ValidationPolicy::default())
            .handle(CreateMilestoneCommand {
                scope: Scope::Global,
                input: MilestoneInput {
                    title: Some("Alpha".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        TransitionMilestoneHandler::new(store.clone())
            .handle(TransitionMilestoneCommand {
                milestone_id: *milestone.id(),
                target: MilestoneState::InProgress,
            })
            .await
            .unwrap();
        let release = release(&store).await;
        AssociateReleaseHandler::new(store.clone())
            .handle(AssociateReleaseCommand {
                release_id: *release.id(),
                milestone_id: *milestone.id(),
            })
            .await
            .unwrap();

        let found = GetReleaseMilestoneHandler::new(store)
            .handle(GetReleaseMilestoneQuery {
                release_id: *release.id(),
            })
            .await
            .unwrap();

        assert_eq!(found.id(), milestone.id());
    }

    #[tokio::test]
    async fn unlinked_release_is_not_associated() {
        let store = Arc::new(InMemoryTrackerStore::new());
        let release = release(&store).await;

        let result = GetReleaseMilestoneHandler::new(store)
            .handle(GetReleaseMilestoneQuery {
                release_id: *release.id(),
            })
            .await;

        assert!(matches!(
            result,
            Err(TrackerError::NotAssociated {
                milestone_id: None,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn stale_reference_is_milestone_not_found() {
        let store = Arc::new(InMemoryTrackerStore::new());
        let dangling = MilestoneId::new();
        let release = Release::reconstitute(
            ReleaseId::new(),
            "v9".to_string(),
            None,
            None,
            Scope::Global,
            Some(dangling),
            Timestamp::now(),
            Timestamp::now(),
        );
        let mut tx = store.begin().await.unwrap();
        tx.save_release(&release).await.unwrap();
        tx.commit().await.unwrap();
        drop(tx);

        let result = GetReleaseMilestoneHandler::new(store)
            .handle(GetReleaseMilestoneQuery {
                release_id: *release.id(),
            })
            .await;

        assert!(matches!(
            result,
            Err(TrackerError::NotFound(EntityRef::Milestone(id))) if id == dangling
        ));
    }
}
