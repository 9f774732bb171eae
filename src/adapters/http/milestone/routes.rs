//! HTTP routes for milestone endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    associate_releases, create_milestone, delete_milestone, get_milestone, list_milestone_releases, list_milestones,
    transition_milestone, MilestoneHandlers,
};

/// Creates the milestone router, to be nested under `/api/milestones`.
pub fn milestone_routes(handlers: MilestoneHandlers) -> Router {
    Router::new()
        .route("/", post(create_milestone).get(list_milestones))
        .route("/:id", get(get_milestone).delete(delete_milestone))
        .route("/:id/transition", post(transition_milestone))
        .route(
            "/:id/releases",
            get(list_milestone_releases).put(associate_releases),
        )
        .with_state(handlers)
}
