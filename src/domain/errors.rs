//! Release tracker error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | ValidationFailed | 400 |
//! | InvalidDueDate | 400 |
//! | DuplicateTitle | 409 |
//! | DuplicateVersion | 409 |
//! | InvalidTransition | 409 |
//! | InvalidMilestoneState | 409 |
//! | AlreadyAssociated | 409 |
//! | NotAssociated | 409 |
//! | ConcurrentModification | 409 |
//! | StoreFailure | 500 |

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, MilestoneId, ReleaseId, Scope, TransitionError,
};
use crate::domain::milestone::MilestoneState;
use crate::domain::validation::FieldErrors;

/// Entity referenced by a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Milestone(MilestoneId),
    Release(ReleaseId),
}

impl EntityRef {
    /// Entity kind, as rendered to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            EntityRef::Milestone(_) => "Milestone",
            EntityRef::Release(_) => "Release",
        }
    }

    pub fn id(&self) -> String {
        match self {
            EntityRef::Milestone(id) => id.to_string(),
            EntityRef::Release(id) => id.to_string(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Every outcome a milestone, release, or association operation can fail with.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Input violated one or more field rules.
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// Another milestone in the same scope already uses this title.
    #[error("Milestone title '{title}' already exists in {scope}")]
    DuplicateTitle { title: String, scope: Scope },

    /// Another release in the same scope already uses this version.
    #[error("Release version '{version}' already exists in {scope}")]
    DuplicateVersion { version: String, scope: Scope },

    /// The due date lies before today at creation time.
    #[error("Due date {due_date} is in the past")]
    InvalidDueDate { due_date: NaiveDate },

    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Illegal milestone lifecycle move.
    #[error("Milestone {milestone_id} cannot move from {from} to {to}")]
    InvalidTransition {
        milestone_id: MilestoneId,
        from: MilestoneState,
        to: MilestoneState,
    },

    /// Association attempted against a milestone that does not accept releases.
    #[error("Milestone {milestone_id} is {state}; releases can only be associated while IN_PROGRESS")]
    InvalidMilestoneState {
        milestone_id: MilestoneId,
        state: MilestoneState,
    },

    #[error("Release {release_id} is already associated with milestone {milestone_id}")]
    AlreadyAssociated {
        release_id: ReleaseId,
        milestone_id: MilestoneId,
    },

    /// The release is not linked to the given milestone (or to any, when `milestone_id` is None).
    #[error("{}", not_associated_message(.release_id, .milestone_id))]
    NotAssociated {
        release_id: ReleaseId,
        milestone_id: Option<MilestoneId>,
    },

    /// The store aborted the unit of work because a concurrent one touched the same rows.
    /// Nothing was written; the caller may retry.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    /// Unexpected persistence failure, passed through unchanged.
    #[error("Store failure: {0}")]
    StoreFailure(DomainError),
}

fn not_associated_message(release_id: &ReleaseId, milestone_id: &Option<MilestoneId>) -> String {
    match milestone_id {
        Some(milestone_id) => format!(
            "Release {} is not associated with milestone {}",
            release_id, milestone_id
        ),
        None => format!("Release {} is not associated with any milestone", release_id),
    }
}

impl TrackerError {
    pub fn milestone_not_found(id: MilestoneId) -> Self {
        TrackerError::NotFound(EntityRef::Milestone(id))
    }

    pub fn release_not_found(id: ReleaseId) -> Self {
        TrackerError::NotFound(EntityRef::Release(id))
    }

    pub fn invalid_transition(milestone_id: MilestoneId, err: TransitionError<MilestoneState>) -> Self {
        TrackerError::InvalidTransition {
            milestone_id,
            from: err.from,
            to: err.to,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TrackerError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            TrackerError::DuplicateTitle { .. } => ErrorCode::DuplicateTitle,
            TrackerError::DuplicateVersion { .. } => ErrorCode::DuplicateVersion,
            TrackerError::InvalidDueDate { .. } => ErrorCode::InvalidDueDate,
            TrackerError::NotFound(EntityRef::Milestone(_)) => ErrorCode::MilestoneNotFound,
            TrackerError::NotFound(EntityRef::Release(_)) => ErrorCode::ReleaseNotFound,
            TrackerError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            TrackerError::InvalidMilestoneState { .. } => ErrorCode::InvalidMilestoneState,
            TrackerError::AlreadyAssociated { .. } => ErrorCode::AlreadyAssociated,
            TrackerError::NotAssociated { .. } => ErrorCode::NotAssociated,
            TrackerError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            TrackerError::StoreFailure(err) => err.code,
        }
    }

    /// True for rule violations, false for infrastructure failures.
    pub fn is_domain_violation(&self) -> bool {
        !matches!(self, TrackerError::StoreFailure(_))
    }
}

impl From<FieldErrors> for TrackerError {
    fn from(errors: FieldErrors) -> Self {
        TrackerError::ValidationFailed(errors)
    }
}

/// Storage-reported uniqueness violations become domain errors; anything else
/// is a store failure.
impl From<DomainError> for TrackerError {
    fn from(err: DomainError) -> Self {
        let scope = err
            .details
            .get("scope")
            .and_then(|s| parse_scope(s))
            .unwrap_or_default();
        match err.code {
            ErrorCode::DuplicateTitle => TrackerError::DuplicateTitle {
                title: err.details.get("title").cloned().unwrap_or_default(),
                scope,
            },
            ErrorCode::DuplicateVersion => TrackerError::DuplicateVersion {
                version: err.details.get("version").cloned().unwrap_or_default(),
                scope,
            },
            ErrorCode::ConcurrentModification => TrackerError::ConcurrentModification(err.message),
            _ => TrackerError::StoreFailure(err),
        }
    }
}

fn parse_scope(rendered: &str) -> Option<Scope> {
    use crate::domain::foundation::{GroupId, ProjectId};

    if rendered == "global" {
        return Some(Scope::Global);
    }
    let (kind, id) = rendered.split_once(':')?;
    let id: i64 = id.parse().ok()?;
    match kind {
        "project" => Some(Scope::Project(ProjectId::new(id))),
        "group" => Some(Scope::Group(GroupId::new(id))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::validation::FieldError;

    #[test]
    fn not_found_reports_entity_kind() {
        let id = MilestoneId::new();
        let err = TrackerError::milestone_not_found(id);
        assert_eq!(err.to_string(), format!("Milestone {} not found", id));
        assert_eq!(err.code(), ErrorCode::MilestoneNotFound);
    }

    #[test]
    fn validation_failed_lists_field_messages() {
        let err = TrackerError::from(FieldErrors::from(FieldError::blank("title")));
        assert_eq!(
            err.to_string(),
            "Validation failed: Field 'title' cannot be blank"
        );
    }

    #[test]
    fn storage_duplicate_title_maps_to_domain_error() {
        let err = DomainError::new(ErrorCode::DuplicateTitle, "unique violation")
            .with_detail("title", "Alpha")
            .with_detail("scope", "project:1");

        match TrackerError::from(err) {
            TrackerError::DuplicateTitle { title, scope } => {
                assert_eq!(title, "Alpha");
                assert_eq!(scope, Scope::Project(ProjectId::new(1)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn other_storage_errors_pass_through_unchanged() {
        let err = DomainError::new(ErrorCode::DatabaseError, "connection refused");
        let tracker_err = TrackerError::from(err);

        assert!(matches!(tracker_err, TrackerError::StoreFailure(ref e) if e.message == "connection refused"));
        assert_eq!(tracker_err.code(), ErrorCode::DatabaseError);
        assert!(!tracker_err.is_domain_violation());
    }

    #[test]
    fn storage_conflict_maps_to_concurrent_modification() {
        let err = DomainError::new(ErrorCode::ConcurrentModification, "deadlock detected");
        let tracker_err = TrackerError::from(err);

        assert!(matches!(tracker_err, TrackerError::ConcurrentModification(ref m) if m == "deadlock detected"));
        assert_eq!(tracker_err.code(), ErrorCode::ConcurrentModification);
        assert!(tracker_err.is_domain_violation());
    }

    #[test]
    fn not_associated_without_milestone_mentions_any() {
        let release_id = ReleaseId::new();
        let err = TrackerError::NotAssociated {
            release_id,
            milestone_id: None,
        };
        assert!(err.to_string().ends_with("is not associated with any milestone"));
    }

    #[test]
    fn invalid_milestone_state_renders_state_name() {
        let err = TrackerError::InvalidMilestoneState {
            milestone_id: MilestoneId::new(),
            state: MilestoneState::Created,
        };
        assert!(err.to_string().contains("is CREATED"));
    }

    #[test]
    fn parse_scope_accepts_rendered_forms() {
        assert_eq!(parse_scope("global"), Some(Scope::Global));
        assert_eq!(parse_scope("project:12"), Some(Scope::Project(ProjectId::new(12))));
        assert_eq!(parse_scope("team:1"), None);
    }
}
