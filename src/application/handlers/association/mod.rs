//! Association command and query handlers.
//!
//! Releases own the only stored link; the milestone side is always derived.

mod associate_release;
mod associate_releases;
mod disassociate_release;
mod get_release_milestone;
mod list_milestone_releases;

pub use associate_release::{AssociateReleaseCommand, AssociateReleaseHandler};
pub use associate_releases::{AssociateReleasesCommand, AssociateReleasesHandler};
pub use disassociate_release::{DisassociateReleaseCommand, DisassociateReleaseHandler};
pub use get_release_milestone::{GetReleaseMilestoneHandler, GetReleaseMilestoneQuery};
pub use list_milestone_releases::{ListMilestoneReleasesHandler, ListMilestoneReleasesQuery};
