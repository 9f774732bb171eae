//! HTTP DTOs for milestone endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::scope_params::{scope_keys, ScopeParams};
use crate::domain::milestone::{Milestone, MilestoneState};
use crate::domain::validation::MilestoneInput;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a milestone. Missing fields are reported by validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestoneRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub scope: ScopeParams,
}

impl CreateMilestoneRequest {
    pub fn input(&self) -> MilestoneInput {
        MilestoneInput {
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            due_date: self.due_date,
        }
    }
}

/// Request to move a milestone to another state.
///
/// `state` stays a string here so unknown values get a 400 with a clear message.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionMilestoneRequest {
    pub state: String,
}

/// Request body for linking several releases to a milestone at once.
///
/// Ids stay strings so a malformed one is reported by value.
#[derive(Debug, Clone, Deserialize)]
pub struct AssociateReleasesRequest {
    pub release_ids: Vec<String>,
}

/// Query parameters for listing milestones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMilestonesQuery {
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Only milestones with neither project nor group.
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub state: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub state: MilestoneState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Milestone> for MilestoneResponse {
    fn from(milestone: Milestone) -> Self {
        let (project_id, group_id) = scope_keys(milestone.scope());
        Self {
            id: milestone.id().to_string(),
            title: milestone.title().to_string(),
            description: milestone.description().map(str::to_string),
            start_date: milestone.start_date(),
            due_date: milestone.due_date(),
            state: milestone.state(),
            project_id,
            group_id,
            created_at: milestone.created_at().as_datetime().to_rfc3339(),
            updated_at: milestone.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneListResponse {
    pub items: Vec<MilestoneResponse>,
    pub total: usize,
}

impl From<Vec<Milestone>> for MilestoneListResponse {
    fn from(milestones: Vec<Milestone>) -> Self {
        let items: Vec<MilestoneResponse> = milestones.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Response for a deleted milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMilestoneResponse {
    pub milestone_id: String,
    pub detached_releases: u64,
    pub message: String,
}
