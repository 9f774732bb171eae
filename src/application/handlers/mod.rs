//! Application handlers.
//!
//! One handler per operation. Write handlers run their whole load-check-write
//! sequence inside one `TrackerTransaction` and commit only once every check
//! has passed.

pub mod association;
pub mod milestone;
pub mod release;

pub use association::{
    AssociateReleaseCommand, AssociateReleaseHandler, AssociateReleasesCommand,
    AssociateReleasesHandler, DisassociateReleaseCommand,
    DisassociateReleaseHandler, GetReleaseMilestoneHandler, GetReleaseMilestoneQuery,
    ListMilestoneReleasesHandler, ListMilestoneReleasesQuery,
};
pub use milestone::{
    CreateMilestoneCommand, CreateMilestoneHandler, DeleteMilestoneCommand,
    DeleteMilestoneHandler, DeleteMilestoneResult, GetMilestoneHandler, GetMilestoneQuery,
    ListMilestonesHandler, TransitionMilestoneCommand, TransitionMilestoneHandler,
};
pub use release::{
    CreateReleaseCommand, CreateReleaseHandler, DeleteReleaseCommand, DeleteReleaseHandler,
    GetReleaseHandler, GetReleaseQuery, ListReleasesHandler,
};

use crate::domain::TrackerError;

/// Rule violations are logged as warnings, store failures as errors.
pub(crate) fn log_failure(operation: &'static str, err: &TrackerError) {
    if err.is_domain_violation() {
        tracing::warn!(operation, code = %err.code(), "{}", err);
    } else {
        tracing::error!(operation, error = %err, "Store failure");
    }
}
