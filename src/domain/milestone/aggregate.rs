//! Milestone aggregate entity.
//!
//! A milestone is a dated goal inside a project, a group, or the global scope.
//!
//! # Ownership
//!
//! Milestones do NOT hold release ids. Releases point at their milestone, and
//! the inverse set is derived by querying releases by milestone id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MilestoneId, Scope, StateMachine, Timestamp, TransitionError};
use crate::domain::validation::{validate_milestone_input, FieldErrors, MilestoneInput, ValidationPolicy};

use super::MilestoneState;

/// Milestone aggregate.
///
/// # Invariants
///
/// - `title` is non-blank and at most 255 characters
/// - `start_date <= due_date` when both are present
/// - `state` only moves along `Created -> InProgress -> Completed`
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    id: MilestoneId,
    title: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    state: MilestoneState,
    scope: Scope,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Milestone {
    /// Create a new milestone in state `Created` from raw input.
    ///
    /// # Errors
    ///
    /// - every field rule the input violates, aggregated
    pub fn create(
        id: MilestoneId,
        scope: Scope,
        input: MilestoneInput,
        policy: &ValidationPolicy,
    ) -> Result<Self, FieldErrors> {
        let input = input.normalized();
        validate_milestone_input(&input, policy)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            title: input.title.unwrap_or_default(),
            description: input.description,
            start_date: input.start_date,
            due_date: input.due_date,
            state: MilestoneState::Created,
            scope,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a milestone from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MilestoneId,
        title: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        due_date: Option<NaiveDate>,
        state: MilestoneState,
        scope: Scope,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            start_date,
            due_date,
            state,
            scope,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MilestoneId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn state(&self) -> MilestoneState {
        self.state
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns true if the due date lies strictly before `today`.
    pub fn is_due_before(&self, today: NaiveDate) -> bool {
        self.due_date.map_or(false, |due| due < today)
    }

    /// Returns true if releases may currently be associated.
    pub fn accepts_releases(&self) -> bool {
        self.state.accepts_releases()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to `target` if the lifecycle allows it.
    ///
    /// No-op moves (`target == state`) are rejected like any other invalid edge.
    pub fn transition_to(
        &mut self,
        target: MilestoneState,
    ) -> Result<(), TransitionError<MilestoneState>> {
        self.state = self.state.transition_to(target)?;
        self.touch();
        Ok(())
    }

    /// Bump `updated_at`, e.g. when a release is linked or unlinked.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now().not_before(self.updated_at);
    }
}
