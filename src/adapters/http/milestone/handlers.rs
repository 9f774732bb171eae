//! HTTP handlers for milestone endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_tracker_error};
use crate::adapters::http::release::ReleaseListResponse;
use crate::adapters::http::scope_params::ScopeParams;
use crate::application::handlers::association::{
    AssociateReleasesCommand, AssociateReleasesHandler, ListMilestoneReleasesHandler,
    ListMilestoneReleasesQuery,
};
use crate::application::handlers::milestone::{
    CreateMilestoneCommand, CreateMilestoneHandler, DeleteMilestoneCommand, DeleteMilestoneHandler,
    GetMilestoneHandler, GetMilestoneQuery, ListMilestonesHandler, TransitionMilestoneCommand,
    TransitionMilestoneHandler,
};
use crate::domain::foundation::{MilestoneId, ReleaseId};
use crate::domain::milestone::MilestoneState;
use crate::domain::validation::ValidationPolicy;
use crate::ports::{MilestoneFilter, TrackerStore};

use super::dto::{
    AssociateReleasesRequest, CreateMilestoneRequest, DeleteMilestoneResponse, ListMilestonesQuery, MilestoneListResponse,
    MilestoneResponse, TransitionMilestoneRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct MilestoneHandlers {
    create_handler: Arc<CreateMilestoneHandler>,
    get_handler: Arc<GetMilestoneHandler>,
    list_handler: Arc<ListMilestonesHandler>,
    transition_handler: Arc<TransitionMilestoneHandler>,
    delete_handler: Arc<DeleteMilestoneHandler>,
    releases_handler: Arc<ListMilestoneReleasesHandler>,
    associate_handler: Arc<AssociateReleasesHandler>,
}

impl MilestoneHandlers {
    pub fn new(store: Arc<dyn TrackerStore>, policy: ValidationPolicy) -> Self {
        Self {
            create_handler: Arc::new(CreateMilestoneHandler::new(store.clone(), policy)),
            get_handler: Arc::new(GetMilestoneHandler::new(store.clone())),
            list_handler: Arc::new(ListMilestonesHandler::new(store.clone())),
            transition_handler: Arc::new(TransitionMilestoneHandler::new(store.clone())),
            delete_handler: Arc::new(DeleteMilestoneHandler::new(store.clone())),
            releases_handler: Arc::new(ListMilestoneReleasesHandler::new(store.clone())),
            associate_handler: Arc::new(AssociateReleasesHandler::new(store)),
        }
    }
}

fn parse_milestone_id(raw: &str) -> Result<MilestoneId, Response> {
    raw.parse::<MilestoneId>()
        .map_err(|_| bad_request("Invalid milestone ID"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/milestones - Create a milestone
pub async fn create_milestone(
    State(handlers): State<MilestoneHandlers>,
    Json(req): Json<CreateMilestoneRequest>,
) -> Response {
    let scope = match req.scope.to_scope() {
        Ok(scope) => scope,
        Err(message) => return bad_request(message),
    };
    let cmd = CreateMilestoneCommand {
        scope,
        input: req.input(),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(milestone) => {
            let response: MilestoneResponse = milestone.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/milestones - List milestones, optionally by scope and state
pub async fn list_milestones(
    State(handlers): State<MilestoneHandlers>,
    Query(params): Query<ListMilestonesQuery>,
) -> Response {
    let scope_params = ScopeParams {
        project_id: params.project_id,
        group_id: params.group_id,
    };
    let mut filter = MilestoneFilter::default();
    match scope_params.to_filter_scope(params.global) {
        Ok(Some(scope)) => filter = filter.in_scope(scope),
        Ok(None) => {}
        Err(message) => return bad_request(message),
    }
    if let Some(raw) = params.state.as_deref() {
        match raw.parse::<MilestoneState>() {
            Ok(state) => filter = filter.with_state(state),
            Err(e) => return bad_request(e.to_string()),
        }
    }

    match handlers.list_handler.handle(filter).await {
        Ok(milestones) => {
            let response: MilestoneListResponse = milestones.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/milestones/:id - Get one milestone
pub async fn get_milestone(
    State(handlers): State<MilestoneHandlers>,
    Path(milestone_id): Path<String>,
) -> Response {
    let milestone_id = match parse_milestone_id(&milestone_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetMilestoneQuery { milestone_id })
        .await
    {
        Ok(milestone) => {
            let response: MilestoneResponse = milestone.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// POST /api/milestones/:id/transition - Move a milestone to another state
pub async fn transition_milestone(
    State(handlers): State<MilestoneHandlers>,
    Path(milestone_id): Path<String>,
    Json(req): Json<TransitionMilestoneRequest>,
) -> Response {
    let milestone_id = match parse_milestone_id(&milestone_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let target = match req.state.parse::<MilestoneState>() {
        Ok(state) => state,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = TransitionMilestoneCommand {
        milestone_id,
        target,
    };

    match handlers.transition_handler.handle(cmd).await {
        Ok(milestone) => {
            let response: MilestoneResponse = milestone.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// DELETE /api/milestones/:id - Delete a milestone, detaching its releases
pub async fn delete_milestone(
    State(handlers): State<MilestoneHandlers>,
    Path(milestone_id): Path<String>,
) -> Response {
    let milestone_id = match parse_milestone_id(&milestone_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteMilestoneCommand { milestone_id })
        .await
    {
        Ok(result) => {
            let response = DeleteMilestoneResponse {
                milestone_id: milestone_id.to_string(),
                detached_releases: result.detached_releases,
                message: "Milestone deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/milestones/:id/releases - Releases linked to a milestone
pub async fn list_milestone_releases(
    State(handlers): State<MilestoneHandlers>,
    Path(milestone_id): Path<String>,
) -> Response {
    let milestone_id = match parse_milestone_id(&milestone_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .releases_handler
        .handle(ListMilestoneReleasesQuery { milestone_id })
        .await
    {
        Ok(releases) => {
            let response: ReleaseListResponse = releases.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// PUT /api/milestones/:id/releases - Link a batch of releases, all or nothing
pub async fn associate_releases(
    State(handlers): State<MilestoneHandlers>,
    Path(milestone_id): Path<String>,
    Json(req): Json<AssociateReleasesRequest>,
) -> Response {
    let milestone_id = match parse_milestone_id(&milestone_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let release_ids = match parse_release_ids(&req.release_ids) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = AssociateReleasesCommand {
        milestone_id,
        release_ids,
    };

    match handlers.associate_handler.handle(cmd).await {
        Ok(releases) => {
            let response: ReleaseListResponse = releases.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

fn parse_release_ids(raw: &[String]) -> Result<Vec<ReleaseId>, Response> {
    raw.iter()
        .map(|id| {
            id.parse::<ReleaseId>()
                .map_err(|_| bad_request(format!("Invalid release ID: {}", id)))
        })
        .collect()
}
