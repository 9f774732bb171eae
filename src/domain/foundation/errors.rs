//! Error types shared across the domain layer and its ports.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidDueDate,

    // Uniqueness errors
    DuplicateTitle,
    DuplicateVersion,

    // Not found errors
    MilestoneNotFound,
    ReleaseNotFound,

    // State errors
    InvalidStateTransition,
    InvalidMilestoneState,
    AlreadyAssociated,
    NotAssociated,
    ConcurrentModification,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidDueDate => "INVALID_DUE_DATE",
            ErrorCode::DuplicateTitle => "DUPLICATE_TITLE",
            ErrorCode::DuplicateVersion => "DUPLICATE_VERSION",
            ErrorCode::MilestoneNotFound => "MILESTONE_NOT_FOUND",
            ErrorCode::ReleaseNotFound => "RELEASE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::InvalidMilestoneState => "INVALID_MILESTONE_STATE",
            ErrorCode::AlreadyAssociated => "ALREADY_ASSOCIATED",
            ErrorCode::NotAssociated => "NOT_ASSOCIATED",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Error reported across the port boundary, with code, message, and optional details.
///
/// Store adapters return this type. Uniqueness violations detected by the storage
/// layer itself are reported with `DuplicateTitle` / `DuplicateVersion` so the
/// application layer can surface them as domain errors.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error from any displayable source.
    pub fn database(context: &str, source: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, source))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
