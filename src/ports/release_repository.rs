//! Release repository port.
//!
//! Releases hold the only stored milestone reference, so this port also
//! answers the derived "releases of a milestone" query.

use crate::domain::foundation::{DomainError, MilestoneId, ReleaseId, Scope};
use crate::domain::release::Release;
use async_trait::async_trait;

/// Repository port for Release aggregate persistence.
///
/// Implementations must enforce version uniqueness per scope at the storage
/// layer and report violations with `ErrorCode::DuplicateVersion` (details:
/// `version`, `scope`).
#[async_trait]
pub trait ReleaseRepository: Send {
    /// Find a release by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_release(&mut self, id: &ReleaseId) -> Result<Option<Release>, DomainError>;

    /// Find the release with exactly this version in `scope`.
    async fn find_release_by_version(
        &mut self,
        version: &str,
        scope: &Scope,
    ) -> Result<Option<Release>, DomainError>;

    /// Insert a new release or replace an existing one with the same ID.
    ///
    /// # Errors
    ///
    /// - `DuplicateVersion` if another release in the scope has the version
    /// - `DatabaseError` on persistence failure
    async fn save_release(&mut self, release: &Release) -> Result<(), DomainError>;

    /// Delete a release. Returns `false` if it did not exist.
    async fn delete_release(&mut self, id: &ReleaseId) -> Result<bool, DomainError>;

    /// List releases matching `filter`, ordered by `created_at` ascending.
    async fn list_releases(&mut self, filter: &ReleaseFilter) -> Result<Vec<Release>, DomainError>;

    /// Clear the milestone reference of every release linked to `milestone_id`.
    ///
    /// Returns the number of releases changed.
    async fn detach_releases(&mut self, milestone_id: &MilestoneId) -> Result<u64, DomainError>;
}

/// Criteria for listing releases. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseFilter {
    pub scope: Option<Scope>,
    pub milestone_id: Option<MilestoneId>,
}

impl ReleaseFilter {
    /// Restrict to one scope.
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Restrict to releases linked to one milestone.
    pub fn for_milestone(mut self, milestone_id: MilestoneId) -> Self {
        self.milestone_id = Some(milestone_id);
        self
    }

    pub fn matches(&self, release: &Release) -> bool {
        self.scope.map_or(true, |s| release.scope() == s)
            && self
                .milestone_id
                .map_or(true, |m| release.milestone_id() == Some(m))
    }
}
