//! HTTP adapter for milestone endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AssociateReleasesRequest, CreateMilestoneRequest, DeleteMilestoneResponse,
    ListMilestonesQuery, MilestoneListResponse, MilestoneResponse, TransitionMilestoneRequest,
};
pub use handlers::MilestoneHandlers;
pub use routes::milestone_routes;
