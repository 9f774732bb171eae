//! Field-level validation failures, aggregated.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single violated input rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' cannot be blank")]
    Blank { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be on or after '{other}'")]
    BeforeOther { field: String, other: String },

    #[error("Field '{field}' must not be in the past")]
    InPast { field: String },
}

impl FieldError {
    pub fn required(field: impl Into<String>) -> Self {
        FieldError::Required { field: field.into() }
    }

    pub fn blank(field: impl Into<String>) -> Self {
        FieldError::Blank { field: field.into() }
    }

    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        FieldError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    pub fn before_other(field: impl Into<String>, other: impl Into<String>) -> Self {
        FieldError::BeforeOther {
            field: field.into(),
            other: other.into(),
        }
    }

    pub fn in_past(field: impl Into<String>) -> Self {
        FieldError::InPast { field: field.into() }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            FieldError::Required { field }
            | FieldError::Blank { field }
            | FieldError::TooLong { field, .. }
            | FieldError::BeforeOther { field, .. }
            | FieldError::InPast { field } => field,
        }
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Flattened view of a field error for transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrorView {
    pub field: String,
    pub message: String,
}

impl From<&FieldError> for FieldErrorView {
    fn from(err: &FieldError) -> Self {
        Self {
            field: err.field().to_string(),
            message: err.message(),
        }
    }
}

/// Every rule an input violated, in the order the rules were checked.
///
/// A `FieldErrors` value returned as an error is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// True if any error concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    pub fn views(&self) -> Vec<FieldErrorView> {
        self.0.iter().map(FieldErrorView::from).collect()
    }

    /// `Ok(())` when no rule was violated, otherwise all collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}
