//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Milestone handlers
    CreateMilestoneCommand, CreateMilestoneHandler,
    DeleteMilestoneCommand, DeleteMilestoneHandler, DeleteMilestoneResult,
    GetMilestoneHandler, GetMilestoneQuery,
    ListMilestonesHandler,
    TransitionMilestoneCommand, TransitionMilestoneHandler,
    // Release handlers
    CreateReleaseCommand, CreateReleaseHandler,
    DeleteReleaseCommand, DeleteReleaseHandler,
    GetReleaseHandler, GetReleaseQuery,
    ListReleasesHandler,
    // Association handlers
    AssociateReleaseCommand, AssociateReleaseHandler,
    AssociateReleasesCommand, AssociateReleasesHandler,
    DisassociateReleaseCommand, DisassociateReleaseHandler,
    GetReleaseMilestoneHandler, GetReleaseMilestoneQuery,
    ListMilestoneReleasesHandler, ListMilestoneReleasesQuery,
};
