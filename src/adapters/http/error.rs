//! Error body shared by every endpoint, and the mapping from `TrackerError`
//! to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::domain::TrackerError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// 400 with a plain message, for input rejected before it reaches a handler.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

/// HTTP status for each error kind.
pub fn status_for(error: &TrackerError) -> StatusCode {
    match error {
        TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
        TrackerError::ValidationFailed(_) | TrackerError::InvalidDueDate { .. } => {
            StatusCode::BAD_REQUEST
        }
        TrackerError::DuplicateTitle { .. }
        | TrackerError::DuplicateVersion { .. }
        | TrackerError::InvalidTransition { .. }
        | TrackerError::InvalidMilestoneState { .. }
        | TrackerError::AlreadyAssociated { .. }
        | TrackerError::NotAssociated { .. }
        | TrackerError::ConcurrentModification(_) => StatusCode::CONFLICT,
        TrackerError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn details_for(error: &TrackerError) -> Option<serde_json::Value> {
    let details = match error {
        TrackerError::ValidationFailed(errors) => json!({ "fields": errors.views() }),
        TrackerError::DuplicateTitle { title, scope } => {
            json!({ "title": title, "scope": scope.to_string() })
        }
        TrackerError::DuplicateVersion { version, scope } => {
            json!({ "version": version, "scope": scope.to_string() })
        }
        TrackerError::InvalidDueDate { due_date } => json!({ "due_date": due_date }),
        TrackerError::NotFound(entity) => json!({ "entity": entity.kind(), "id": entity.id() }),
        TrackerError::InvalidTransition {
            milestone_id,
            from,
            to,
        } => json!({ "milestone_id": milestone_id, "from": from, "to": to }),
        TrackerError::InvalidMilestoneState {
            milestone_id,
            state,
        } => json!({ "milestone_id": milestone_id, "state": state }),
        TrackerError::AlreadyAssociated {
            release_id,
            milestone_id,
        } => json!({ "release_id": release_id, "milestone_id": milestone_id }),
        TrackerError::NotAssociated {
            release_id,
            milestone_id,
        } => json!({ "release_id": release_id, "milestone_id": milestone_id }),
        TrackerError::ConcurrentModification(_) | TrackerError::StoreFailure(_) => return None,
    };
    Some(details)
}

/// Converts a handler error into a response with status, code, message, and details.
///
/// Store failure messages are not echoed to the client.
pub fn handle_tracker_error(error: TrackerError) -> Response {
    let status = status_for(&error);
    let body = match &error {
        TrackerError::StoreFailure(_) => ErrorResponse::internal("Internal server error"),
        _ => ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
            details: details_for(&error),
        },
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, MilestoneId, ReleaseId, Scope};
    use crate::domain::milestone::MilestoneState;
    use crate::domain::validation::{FieldError, FieldErrors};

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_tracker_error(TrackerError::milestone_not_found(MilestoneId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_failed_maps_to_400_with_fields() {
        let errors: FieldErrors = FieldError::required("title").into();
        let error = TrackerError::ValidationFailed(errors);

        assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
        let details = details_for(&error).unwrap();
        assert_eq!(details["fields"][0]["field"], "title");
    }

    #[test]
    fn rule_conflicts_map_to_409() {
        let milestone_id = MilestoneId::new();
        let release_id = ReleaseId::new();
        let conflicts = [
            TrackerError::DuplicateTitle {
                title: "Alpha".to_string(),
                scope: Scope::Global,
            },
            TrackerError::DuplicateVersion {
                version: "v1".to_string(),
                scope: Scope::Global,
            },
            TrackerError::InvalidTransition {
                milestone_id,
                from: MilestoneState::Created,
                to: MilestoneState::Completed,
            },
            TrackerError::InvalidMilestoneState {
                milestone_id,
                state: MilestoneState::Created,
            },
            TrackerError::AlreadyAssociated {
                release_id,
                milestone_id,
            },
            TrackerError::NotAssociated {
                release_id,
                milestone_id: None,
            },
            TrackerError::ConcurrentModification("deadlock detected".to_string()),
        ];

        for error in conflicts {
            assert_eq!(status_for(&error), StatusCode::CONFLICT, "{}", error);
        }
    }

    #[test]
    fn store_failure_maps_to_500() {
        let error = TrackerError::StoreFailure(DomainError::new(
            ErrorCode::DatabaseError,
            "connection refused",
        ));
        let response = handle_tracker_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn transition_details_use_wire_state_names() {
        let error = TrackerError::InvalidTransition {
            milestone_id: MilestoneId::new(),
            from: MilestoneState::Created,
            to: MilestoneState::Completed,
        };
        let details = details_for(&error).unwrap();
        assert_eq!(details["from"], "CREATED");
        assert_eq!(details["to"], "COMPLETED");
    }
}
