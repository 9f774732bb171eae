//! Milestone repository port.
//!
//! Defines the contract for persisting and retrieving Milestone aggregates.
//! Methods take `&mut self` because every call runs inside a
//! [`TrackerTransaction`](super::TrackerTransaction).

use crate::domain::foundation::{DomainError, MilestoneId, Scope};
use crate::domain::milestone::{Milestone, MilestoneState};
use async_trait::async_trait;

/// Repository port for Milestone aggregate persistence.
///
/// Implementations must enforce title uniqueness per scope at the storage
/// layer and report violations with `ErrorCode::DuplicateTitle` (details:
/// `title`, `scope`).
#[async_trait]
pub trait MilestoneRepository: Send {
    /// Find a milestone by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_milestone(&mut self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError>;

    /// Find the milestone with exactly this title in `scope`.
    async fn find_milestone_by_title(
        &mut self,
        title: &str,
        scope: &Scope,
    ) -> Result<Option<Milestone>, DomainError>;

    /// Insert a new milestone or replace an existing one with the same ID.
    ///
    /// # Errors
    ///
    /// - `DuplicateTitle` if another milestone in the scope has the title
    /// - `DatabaseError` on persistence failure
    async fn save_milestone(&mut self, milestone: &Milestone) -> Result<(), DomainError>;

    /// Delete a milestone. Returns `false` if it did not exist.
    async fn delete_milestone(&mut self, id: &MilestoneId) -> Result<bool, DomainError>;

    /// List milestones matching `filter`, ordered by `created_at` ascending.
    async fn list_milestones(
        &mut self,
        filter: &MilestoneFilter,
    ) -> Result<Vec<Milestone>, DomainError>;
}

/// Criteria for listing milestones. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MilestoneFilter {
    pub scope: Option<Scope>,
    pub state: Option<MilestoneState>,
}

impl MilestoneFilter {
    /// Restrict to one scope.
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Restrict to one state.
    pub fn with_state(mut self, state: MilestoneState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn matches(&self, milestone: &Milestone) -> bool {
        self.scope.map_or(true, |s| milestone.scope() == s)
            && self.state.map_or(true, |s| milestone.state() == s)
    }
}
