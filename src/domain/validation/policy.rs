//! Configuration-dependent validation rules.

use serde::Deserialize;

/// Maximum length of a milestone title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a milestone description.
pub const MAX_MILESTONE_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum length of a release version/tag.
pub const MAX_VERSION_LENGTH: usize = 100;

/// Maximum length of a release description.
pub const MAX_RELEASE_DESCRIPTION_LENGTH: usize = 1000;

/// Switches for the rules that differ between deployments.
///
/// Length limits are fixed; these flags only control which optional fields
/// become mandatory and whether release dates may lie in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ValidationPolicy {
    /// Milestones must carry a due date.
    #[serde(default)]
    pub require_due_date: bool,

    /// Releases must carry a release date.
    #[serde(default)]
    pub require_release_date: bool,

    /// A release date, when present, must be today or later.
    #[serde(default = "default_release_date_not_in_past")]
    pub release_date_not_in_past: bool,

    /// Releases must carry a non-blank description.
    #[serde(default)]
    pub require_release_description: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_due_date: false,
            require_release_date: false,
            release_date_not_in_past: default_release_date_not_in_past(),
            require_release_description: false,
        }
    }
}

impl ValidationPolicy {
    /// The most permissive policy: every optional field stays optional and any date is accepted.
    pub fn lenient() -> Self {
        Self {
            require_due_date: false,
            require_release_date: false,
            release_date_not_in_past: false,
            require_release_description: false,
        }
    }
}

fn default_release_date_not_in_past() -> bool {
    true
}
