//! Scope keys as they appear in request bodies and query strings.

use serde::Deserialize;

use crate::domain::foundation::{GroupId, ProjectId, Scope};

/// `project_id` / `group_id` pair; at most one may be set.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScopeParams {
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
}

impl ScopeParams {
    /// The scope an entity is created in. Neither key means global.
    pub fn to_scope(self) -> Result<Scope, String> {
        Scope::from_parts(self.project_id.map(ProjectId::new), self.group_id.map(GroupId::new))
            .ok_or_else(|| "project_id and group_id are mutually exclusive".to_string())
    }

    /// The scope a listing is restricted to. Neither key (and `global` unset) means any scope.
    pub fn to_filter_scope(self, global: bool) -> Result<Option<Scope>, String> {
        match (self.project_id, self.group_id, global) {
            (None, None, false) => Ok(None),
            (None, None, true) => Ok(Some(Scope::Global)),
            (_, _, true) => Err("global cannot be combined with project_id or group_id".to_string()),
            _ => self.to_scope().map(Some),
        }
    }
}

/// Splits a scope back into its wire keys.
pub fn scope_keys(scope: Scope) -> (Option<i64>, Option<i64>) {
    (
        scope.project_id().map(|p| p.value()),
        scope.group_id().map(|g| g.value()),
    )
}
