//! Uniqueness scope for milestones and releases.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GroupId, ProjectId};

/// The partition within which titles and versions must be unique.
///
/// A milestone or release belongs to exactly one project, exactly one group,
/// or neither. Entities without a project or group share the global scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Scope {
    Project(ProjectId),
    Group(GroupId),
    #[default]
    Global,
}

impl Scope {
    /// Builds a scope from optional project and group keys.
    ///
    /// Returns `None` when both are set, which no entity may carry.
    pub fn from_parts(project_id: Option<ProjectId>, group_id: Option<GroupId>) -> Option<Self> {
        match (project_id, group_id) {
            (Some(project), None) => Some(Scope::Project(project)),
            (None, Some(group)) => Some(Scope::Group(group)),
            (None, None) => Some(Scope::Global),
            (Some(_), Some(_)) => None,
        }
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Scope::Project(id) => Some(*id),
            _ => None,
        }
    }

    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            Scope::Group(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project(id) => write!(f, "project:{}", id),
            Scope::Group(id) => write!(f, "group:{}", id),
            Scope::Global => write!(f, "global"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_selects_the_set_key() {
        assert_eq!(
            Scope::from_parts(Some(ProjectId::new(1)), None),
            Some(Scope::Project(ProjectId::new(1)))
        );
        assert_eq!(
            Scope::from_parts(None, Some(GroupId::new(2))),
            Some(Scope::Group(GroupId::new(2)))
        );
        assert_eq!(Scope::from_parts(None, None), Some(Scope::Global));
    }

    #[test]
    fn from_parts_rejects_both_keys() {
        assert_eq!(
            Scope::from_parts(Some(ProjectId::new(1)), Some(GroupId::new(2))),
            None
        );
    }

    #[test]
    fn project_and_group_scopes_are_distinct_even_with_equal_keys() {
        assert_ne!(
            Scope::Project(ProjectId::new(1)),
            Scope::Group(GroupId::new(1))
        );
    }

    #[test]
    fn display_is_kind_prefixed() {
        assert_eq!(Scope::Project(ProjectId::new(1)).to_string(), "project:1");
        assert_eq!(Scope::Group(GroupId::new(4)).to_string(), "group:4");
        assert_eq!(Scope::Global.to_string(), "global");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Scope::Project(ProjectId::new(3))).unwrap();
        assert_eq!(json, r#"{"kind":"project","id":3}"#);

        let global: Scope = serde_json::from_str(r#"{"kind":"global"}"#).unwrap();
        assert_eq!(global, Scope::Global);
    }
}
