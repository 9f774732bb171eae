//! HTTP DTOs for release and association endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::scope_params::{scope_keys, ScopeParams};
use crate::domain::release::Release;
use crate::domain::validation::ReleaseInput;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a release. The release starts unassociated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReleaseRequest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub scope: ScopeParams,
}

impl CreateReleaseRequest {
    pub fn input(&self) -> ReleaseInput {
        ReleaseInput {
            version: self.version.clone(),
            description: self.description.clone(),
            release_date: self.release_date,
        }
    }
}

/// Query parameters for listing releases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReleasesQuery {
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub milestone_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Always present; `null` when unassociated.
    pub milestone_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Release> for ReleaseResponse {
    fn from(release: Release) -> Self {
        let (project_id, group_id) = scope_keys(release.scope());
        Self {
            id: release.id().to_string(),
            version: release.version().to_string(),
            description: release.description().map(str::to_string),
            release_date: release.release_date(),
            project_id,
            group_id,
            milestone_id: release.milestone_id().map(|m| m.to_string()),
            created_at: release.created_at().as_datetime().to_rfc3339(),
            updated_at: release.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseListResponse {
    pub items: Vec<ReleaseResponse>,
    pub total: usize,
}

impl From<Vec<Release>> for ReleaseListResponse {
    fn from(releases: Vec<Release>) -> Self {
        let items: Vec<ReleaseResponse> = releases.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Response for release command operations without a body of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseCommandResponse {
    pub release_id: String,
    pub message: String,
}
