//! Transactional store port.
//!
//! Every load-check-write sequence (create with uniqueness check, transition,
//! associate, disassociate, delete with detach) runs inside one
//! `TrackerTransaction`. Handlers commit only after all checks pass; a
//! transaction dropped without `commit` is rolled back.
//!
//! # Example
//!
//! ```ignore
//! let mut tx = store.begin().await?;
//! let mut release = tx.find_release(&id).await?.ok_or(...)?;
//! release.associate(milestone_id)?;
//! tx.save_release(&release).await?;
//! tx.commit().await?;
//! ```

use async_trait::async_trait;

use super::{MilestoneRepository, ReleaseRepository};
use crate::domain::foundation::DomainError;

/// One atomic unit of work over milestones and releases.
#[async_trait]
pub trait TrackerTransaction: MilestoneRepository + ReleaseRepository + Send {
    /// Make every write of this transaction visible, all at once.
    ///
    /// # Errors
    ///
    /// - `DuplicateTitle` / `DuplicateVersion` if a deferred constraint fails
    /// - `DatabaseError` on persistence failure, or if already committed
    async fn commit(&mut self) -> Result<(), DomainError>;
}

/// Factory for transactions; the handle the application layer is built with.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    /// Start a new transaction.
    async fn begin(&self) -> Result<Box<dyn TrackerTransaction>, DomainError>;
}
