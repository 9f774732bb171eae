//! In-Memory Tracker Store Adapter
//!
//! Keeps milestones and releases in memory. Useful for tests and for running
//! the service without a database.
//!
//! A transaction holds the store's mutex for its whole lifetime and works on a
//! staged copy, so transactions are serialized and writes only become
//! visible on `commit`. Uniqueness of titles and versions per scope is checked
//! on every save, mirroring the database's unique indexes.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{DomainError, ErrorCode, MilestoneId, ReleaseId, Scope};
use crate::domain::milestone::Milestone;
use crate::domain::release::Release;
use crate::ports::{
    MilestoneFilter, MilestoneRepository, ReleaseFilter, ReleaseRepository, TrackerStore,
    TrackerTransaction,
};

#[derive(Debug, Clone, Default)]
struct TrackerState {
    milestones: Vec<Milestone>,
    releases: Vec<Release>,
}

/// In-memory implementation of `TrackerStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerStore {
    state: Arc<Mutex<TrackerState>>,
    fail_writes: bool,
}

impl InMemoryTrackerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail with `DatabaseError` (useful for tests).
    pub fn failing_writes() -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState::default())),
            fail_writes: true,
        }
    }

    /// Get the number of committed milestones
    pub async fn milestone_count(&self) -> usize {
        self.state.lock().await.milestones.len()
    }

    /// Get the number of committed releases
    pub async fn release_count(&self) -> usize {
        self.state.lock().await.releases.len()
    }
}

#[async_trait]
impl TrackerStore for InMemoryTrackerStore {
    async fn begin(&self) -> Result<Box<dyn TrackerTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            committed: false,
            fail_writes: self.fail_writes,
        }))
    }
}

/// Transaction over the in-memory store. Dropping it discards `staged`.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<TrackerState>,
    staged: TrackerState,
    committed: bool,
    fail_writes: bool,
}

impl InMemoryTransaction {
    fn check_writable(&self, operation: &str) -> Result<(), DomainError> {
        if self.committed {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Cannot {} in a committed transaction", operation),
            ));
        }
        if self.fail_writes {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Simulated failure to {}", operation),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MilestoneRepository for InMemoryTransaction {
    async fn find_milestone(&mut self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError> {
        Ok(self.staged.milestones.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_milestone_by_title(
        &mut self,
        title: &str,
        scope: &Scope,
    ) -> Result<Option<Milestone>, DomainError> {
        Ok(self
            .staged
            .milestones
            .iter()
            .find(|m| m.title() == title && m.scope() == *scope)
            .cloned())
    }

    async fn save_milestone(&mut self, milestone: &Milestone) -> Result<(), DomainError> {
        self.check_writable("save milestone")?;

        let conflict = self.staged.milestones.iter().any(|m| {
            m.id() != milestone.id()
                && m.title() == milestone.title()
                && m.scope() == milestone.scope()
        });
        if conflict {
            return Err(DomainError::new(
                ErrorCode::DuplicateTitle,
                "Milestone title must be unique within its scope",
            )
            .with_detail("title", milestone.title())
            .with_detail("scope", milestone.scope().to_string()));
        }

        match self
            .staged
            .milestones
            .iter()
            .position(|m| m.id() == milestone.id())
        {
            Some(pos) => self.staged.milestones[pos] = milestone.clone(),
            None => self.staged.milestones.push(milestone.clone()),
        }
        Ok(())
    }

    async fn delete_milestone(&mut self, id: &MilestoneId) -> Result<bool, DomainError> {
        self.check_writable("delete milestone")?;

        let before = self.staged.milestones.len();
        self.staged.milestones.retain(|m| m.id() != id);
        Ok(self.staged.milestones.len() != before)
    }

    async fn list_milestones(
        &mut self,
        filter: &MilestoneFilter,
    ) -> Result<Vec<Milestone>, DomainError> {
        let mut milestones: Vec<Milestone> = self
            .staged
            .milestones
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        milestones.sort_by_key(|m| *m.created_at());
        Ok(milestones)
    }
}

#[async_trait]
impl ReleaseRepository for InMemoryTransaction {
    async fn find_release(&mut self, id: &ReleaseId) -> Result<Option<Release>, DomainError> {
        Ok(self.staged.releases.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_release_by_version(
        &mut self,
        version: &str,
        scope: &Scope,
    ) -> Result<Option<Release>, DomainError> {
        Ok(self
            .staged
            .releases
            .iter()
            .find(|r| r.version() == version && r.scope() == *scope)
            .cloned())
    }

    async fn save_release(&mut self, release: &Release) -> Result<(), DomainError> {
        self.check_writable("save release")?;

        let conflict = self.staged.releases.iter().any(|r| {
            r.id() != release.id() && r.version() == release.version() && r.scope() == release.scope()
        });
        if conflict {
            return Err(DomainError::new(
                ErrorCode::DuplicateVersion,
                "Release version must be unique within its scope",
            )
            .with_detail("version", release.version())
            .with_detail("scope", release.scope().to_string()));
        }

        match self
            .staged
            .releases
            .iter()
            .position(|r| r.id() == release.id())
        {
            Some(pos) => self.staged.releases[pos] = release.clone(),
            None => self.staged.releases.push(release.clone()),
        }
        Ok(())
    }

    async fn delete_release(&mut self, id: &ReleaseId) -> Result<bool, DomainError> {
        self.check_writable("delete release")?;

        let before = self.staged.releases.len();
        self.staged.releases.retain(|r| r.id() != id);
        Ok(self.staged.releases.len() != before)
    }

    async fn list_releases(&mut self, filter: &ReleaseFilter) -> Result<Vec<Release>, DomainError> {
        let mut releases: Vec<Release> = self
            .staged
            .releases
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        releases.sort_by_key(|r| *r.created_at());
        Ok(releases)
    }

    async fn detach_releases(&mut self, milestone_id: &MilestoneId) -> Result<u64, DomainError> {
        self.check_writable("detach releases")?;

        let mut detached = 0;
        for release in self
            .staged
            .releases
            .iter_mut()
            .filter(|r| r.milestone_id() == Some(*milestone_id))
        {
            release.disassociate(*milestone_id).map_err(|e| {
                DomainError::new(ErrorCode::InternalError, e.to_string())
            })?;
            detached += 1;
        }
        Ok(detached)
    }
}

#[async_trait]
impl TrackerTransaction for InMemoryTransaction {
    async fn commit(&mut self) -> Result<(), DomainError> {
        if self.committed {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Transaction already committed",
            ));
        }
        *self.guard = std::mem::take(&mut self.staged);
        self.committed = true;
        Ok(())
    }
}
