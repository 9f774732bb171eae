//! HTTP handlers for release and association endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_tracker_error};
use crate::adapters::http::milestone::MilestoneResponse;
use crate::adapters::http::scope_params::ScopeParams;
use crate::application::handlers::association::{
    AssociateReleaseCommand, AssociateReleaseHandler, DisassociateReleaseCommand,
    DisassociateReleaseHandler, GetReleaseMilestoneHandler, GetReleaseMilestoneQuery,
};
use crate::application::handlers::release::{
    CreateReleaseCommand, CreateReleaseHandler, DeleteReleaseCommand, DeleteReleaseHandler,
    GetReleaseHandler, GetReleaseQuery, ListReleasesHandler,
};
use crate::domain::foundation::{MilestoneId, ReleaseId};
use crate::domain::release::Release;
use crate::domain::validation::ValidationPolicy;
use crate::ports::{ReleaseFilter, TrackerStore};

use super::dto::{
    CreateReleaseRequest, ListReleasesQuery, ReleaseCommandResponse, ReleaseListResponse,
    ReleaseResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReleaseHandlers {
    create_handler: Arc<CreateReleaseHandler>,
    get_handler: Arc<GetReleaseHandler>,
    list_handler: Arc<ListReleasesHandler>,
    delete_handler: Arc<DeleteReleaseHandler>,
    associate_handler: Arc<AssociateReleaseHandler>,
    disassociate_handler: Arc<DisassociateReleaseHandler>,
    milestone_handler: Arc<GetReleaseMilestoneHandler>,
}

impl ReleaseHandlers {
    pub fn new(store: Arc<dyn TrackerStore>, policy: ValidationPolicy) -> Self {
        Self {
            create_handler: Arc::new(CreateReleaseHandler::new(store.clone(), policy)),
            get_handler: Arc::new(GetReleaseHandler::new(store.clone())),
            list_handler: Arc::new(ListReleasesHandler::new(store.clone())),
            delete_handler: Arc::new(DeleteReleaseHandler::new(store.clone())),
            associate_handler: Arc::new(AssociateReleaseHandler::new(store.clone())),
            disassociate_handler: Arc::new(DisassociateReleaseHandler::new(store.clone())),
            milestone_handler: Arc::new(GetReleaseMilestoneHandler::new(store)),
        }
    }
}

fn parse_release_id(raw: &str) -> Result<ReleaseId, Response> {
    raw.parse::<ReleaseId>()
        .map_err(|_| bad_request("Invalid release ID"))
}

fn parse_milestone_id(raw: &str) -> Result<MilestoneId, Response> {
    raw.parse::<MilestoneId>()
        .map_err(|_| bad_request("Invalid milestone ID"))
}

fn parse_link_ids(release_id: &str, milestone_id: &str) -> Result<(ReleaseId, MilestoneId), Response> {
    Ok((parse_release_id(release_id)?, parse_milestone_id(milestone_id)?))
}

fn release_ok(release: Release) -> Response {
    let response: ReleaseResponse = release.into();
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/releases - Create a release
pub async fn create_release(
    State(handlers): State<ReleaseHandlers>,
    Json(req): Json<CreateReleaseRequest>,
) -> Response {
    let scope = match req.scope.to_scope() {
        Ok(scope) => scope,
        Err(message) => return bad_request(message),
    };
    let cmd = CreateReleaseCommand {
        scope,
        input: req.input(),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(release) => {
            let response: ReleaseResponse = release.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/releases - List releases, optionally by scope and milestone
pub async fn list_releases(
    State(handlers): State<ReleaseHandlers>,
    Query(params): Query<ListReleasesQuery>,
) -> Response {
    let scope_params = ScopeParams {
        project_id: params.project_id,
        group_id: params.group_id,
    };
    let mut filter = ReleaseFilter::default();
    match scope_params.to_filter_scope(params.global) {
        Ok(Some(scope)) => filter = filter.in_scope(scope),
        Ok(None) => {}
        Err(message) => return bad_request(message),
    }
    if let Some(raw) = params.milestone_id.as_deref() {
        match parse_milestone_id(raw) {
            Ok(milestone_id) => filter = filter.for_milestone(milestone_id),
            Err(response) => return response,
        }
    }

    match handlers.list_handler.handle(filter).await {
        Ok(releases) => {
            let response: ReleaseListResponse = releases.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/releases/:id - Get one release
pub async fn get_release(
    State(handlers): State<ReleaseHandlers>,
    Path(release_id): Path<String>,
) -> Response {
    let release_id = match parse_release_id(&release_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetReleaseQuery { release_id }).await {
        Ok(release) => release_ok(release),
        Err(e) => handle_tracker_error(e),
    }
}

/// DELETE /api/releases/:id - Delete a release
pub async fn delete_release(
    State(handlers): State<ReleaseHandlers>,
    Path(release_id): Path<String>,
) -> Response {
    let release_id = match parse_release_id(&release_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteReleaseCommand { release_id })
        .await
    {
        Ok(()) => {
            let response = ReleaseCommandResponse {
                release_id: release_id.to_string(),
                message: "Release deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

/// POST /api/releases/:id/milestone/:milestone_id - Associate a release with a milestone
pub async fn associate_release(
    State(handlers): State<ReleaseHandlers>,
    Path((release_id, milestone_id)): Path<(String, String)>,
) -> Response {
    let (release_id, milestone_id) = match parse_link_ids(&release_id, &milestone_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let cmd = AssociateReleaseCommand {
        release_id,
        milestone_id,
    };

    match handlers.associate_handler.handle(cmd).await {
        Ok(release) => release_ok(release),
        Err(e) => handle_tracker_error(e),
    }
}

/// DELETE /api/releases/:id/milestone/:milestone_id - Remove the association
pub async fn disassociate_release(
    State(handlers): State<ReleaseHandlers>,
    Path((release_id, milestone_id)): Path<(String, String)>,
) -> Response {
    let (release_id, milestone_id) = match parse_link_ids(&release_id, &milestone_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let cmd = DisassociateReleaseCommand {
        release_id,
        milestone_id,
    };

    match handlers.disassociate_handler.handle(cmd).await {
        Ok(release) => release_ok(release),
        Err(e) => handle_tracker_error(e),
    }
}

/// GET /api/releases/:id/milestone - The milestone a release is linked to
pub async fn get_release_milestone(
    State(handlers): State<ReleaseHandlers>,
    Path(release_id): Path<String>,
) -> Response {
    let release_id = match parse_release_id(&release_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .milestone_handler
        .handle(GetReleaseMilestoneQuery { release_id })
        .await
    {
        Ok(milestone) => {
            let response: MilestoneResponse = milestone.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_tracker_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_ids_report_the_bad_one() {
        let release_id = ReleaseId::new().to_string();
        let milestone_id = MilestoneId::new().to_string();

        assert!(parse_link_ids(&release_id, &milestone_id).is_ok());
        assert_eq!(
            parse_link_ids("bad", &milestone_id).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            parse_link_ids(&release_id, "bad").unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
