//! Milestone command and query handlers.

mod create_milestone;
mod delete_milestone;
mod get_milestone;
mod list_milestones;
mod transition_milestone;

pub use create_milestone::{CreateMilestoneCommand, CreateMilestoneHandler};
pub use delete_milestone::{DeleteMilestoneCommand, DeleteMilestoneHandler, DeleteMilestoneResult};
pub use get_milestone::{GetMilestoneHandler, GetMilestoneQuery};
pub use list_milestones::ListMilestonesHandler;
pub use transition_milestone::{TransitionMilestoneCommand, TransitionMilestoneHandler};
