//! Release aggregate entity.
//!
//! A release is a tagged version within a project (or the global scope).
//! It owns the only stored link between releases and milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::TrackerError;
use crate::domain::foundation::{MilestoneId, ReleaseId, Scope, Timestamp};
use crate::domain::validation::{validate_release_input, FieldErrors, ReleaseInput, ValidationPolicy};

/// Release aggregate.
///
/// # Invariants
///
/// - `version` is non-blank and at most 100 characters
/// - `milestone_id` references at most one milestone at a time
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    id: ReleaseId,
    version: String,
    description: Option<String>,
    release_date: Option<NaiveDate>,
    scope: Scope,
    milestone_id: Option<MilestoneId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Release {
    /// Create a new, unassociated release from raw input.
    ///
    /// # Errors
    ///
    /// - every field rule the input violates, aggregated
    pub fn create(
        id: ReleaseId,
        scope: Scope,
        input: ReleaseInput,
        policy: &ValidationPolicy,
        today: NaiveDate,
    ) -> Result<Self, FieldErrors> {
        let input = input.normalized();
        validate_release_input(&input, policy, today)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            version: input.version.unwrap_or_default(),
            description: input.description,
            release_date: input.release_date,
            scope,
            milestone_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a release from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReleaseId,
        version: String,
        description: Option<String>,
        release_date: Option<NaiveDate>,
        scope: Scope,
        milestone_id: Option<MilestoneId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            version,
            description,
            release_date,
            scope,
            milestone_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ReleaseId {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn milestone_id(&self) -> Option<MilestoneId> {
        self.milestone_id
    }

    pub fn is_associated(&self) -> bool {
        self.milestone_id.is_some()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Link this release to `milestone_id`.
    ///
    /// # Errors
    ///
    /// - `AlreadyAssociated` if any milestone is already linked, including the same one
    pub fn associate(&mut self, milestone_id: MilestoneId) -> Result<(), TrackerError> {
        if let Some(current) = self.milestone_id {
            return Err(TrackerError::AlreadyAssociated {
                release_id: self.id,
                milestone_id: current,
            });
        }

        self.milestone_id = Some(milestone_id);
        self.touch();
        Ok(())
    }

    /// Unlink this release from `milestone_id`.
    ///
    /// # Errors
    ///
    /// - `NotAssociated` if the release is not linked to exactly that milestone
    pub fn disassociate(&mut self, milestone_id: MilestoneId) -> Result<(), TrackerError> {
        if self.milestone_id != Some(milestone_id) {
            return Err(TrackerError::NotAssociated {
                release_id: self.id,
                milestone_id: Some(milestone_id),
            });
        }

        self.milestone_id = None;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now().not_before(self.updated_at);
    }
}
