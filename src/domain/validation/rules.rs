//! Stateless input checks for milestones and releases.
//!
//! Every rule runs on every call; all violations are reported together.

use chrono::NaiveDate;
use serde::Deserialize;

use super::field_errors::{FieldError, FieldErrors};
use super::policy::{
    ValidationPolicy, MAX_MILESTONE_DESCRIPTION_LENGTH, MAX_RELEASE_DESCRIPTION_LENGTH,
    MAX_TITLE_LENGTH, MAX_VERSION_LENGTH,
};

/// Raw, unvalidated milestone fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MilestoneInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

/// Raw, unvalidated release fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseInput {
    pub version: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl MilestoneInput {
    /// Trims surrounding whitespace from the title, which takes part in scope uniqueness.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }
}

impl ReleaseInput {
    /// Trims surrounding whitespace from the version, which takes part in scope uniqueness.
    pub fn normalized(mut self) -> Self {
        self.version = self.version.map(|v| v.trim().to_string());
        self
    }
}

/// Checks milestone input against the length, presence, and date-order rules.
pub fn validate_milestone_input(
    input: &MilestoneInput,
    policy: &ValidationPolicy,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_required_text(&mut errors, "title", input.title.as_deref(), MAX_TITLE_LENGTH);
    check_optional_text(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_MILESTONE_DESCRIPTION_LENGTH,
    );

    if policy.require_due_date && input.due_date.is_none() {
        errors.push(FieldError::required("due_date"));
    }

    if let (Some(start), Some(due)) = (input.start_date, input.due_date) {
        if start > due {
            errors.push(FieldError::before_other("due_date", "start_date"));
        }
    }

    errors.into_result()
}

/// Checks release input; `today` anchors the not-in-the-past rule.
pub fn validate_release_input(
    input: &ReleaseInput,
    policy: &ValidationPolicy,
    today: NaiveDate,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_required_text(
        &mut errors,
        "version",
        input.version.as_deref(),
        MAX_VERSION_LENGTH,
    );

    if policy.require_release_description {
        check_required_text(
            &mut errors,
            "description",
            input.description.as_deref(),
            MAX_RELEASE_DESCRIPTION_LENGTH,
        );
    } else {
        check_optional_text(
            &mut errors,
            "description",
            input.description.as_deref(),
            MAX_RELEASE_DESCRIPTION_LENGTH,
        );
    }

    match input.release_date {
        None if policy.require_release_date => {
            errors.push(FieldError::required("release_date"));
        }
        Some(date) if policy.release_date_not_in_past && date < today => {
            errors.push(FieldError::in_past("release_date"));
        }
        _ => {}
    }

    errors.into_result()
}

fn check_required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) {
    match value {
        None => errors.push(FieldError::required(field)),
        Some(text) if text.trim().is_empty() => errors.push(FieldError::blank(field)),
        Some(text) => check_length(errors, field, text, max),
    }
}

fn check_optional_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max: usize) {
    if let Some(text) = value {
        check_length(errors, field, text, max);
    }
}

fn check_length(errors: &mut FieldErrors, field: &str, text: &str, max: usize) {
    let actual = text.chars().count();
    if actual > max {
        errors.push(FieldError::too_long(field, max, actual));
    }
}
