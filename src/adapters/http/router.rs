//! Top-level API router.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::domain::validation::ValidationPolicy;
use crate::ports::TrackerStore;

use super::milestone::{milestone_routes, MilestoneHandlers};
use super::release::{release_routes, ReleaseHandlers};

/// Builds the `/api` router over `store`, with request tracing.
pub fn api_router(store: Arc<dyn TrackerStore>, policy: ValidationPolicy) -> Router {
    Router::new()
        .nest(
            "/api/milestones",
            milestone_routes(MilestoneHandlers::new(store.clone(), policy)),
        )
        .nest(
            "/api/releases",
            release_routes(ReleaseHandlers::new(store, policy)),
        )
        .layer(TraceLayer::new_for_http())
}
