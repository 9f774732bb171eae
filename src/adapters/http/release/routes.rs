//! HTTP routes for release and association endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    associate_release, create_release, delete_release, disassociate_release, get_release,
    get_release_milestone, list_releases, ReleaseHandlers,
};

/// Creates the release router, to be nested under `/api/releases`.
pub fn release_routes(handlers: ReleaseHandlers) -> Router {
    Router::new()
        .route("/", post(create_release).get(list_releases))
        .route("/:id", get(get_release).delete(delete_release))
        .route("/:id/milestone", get(get_release_milestone))
        .route(
            "/:id/milestone/:milestone_id",
            post(associate_release).delete(disassociate_release),
        )
        .with_state(handlers)
}
