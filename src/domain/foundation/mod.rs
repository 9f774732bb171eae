//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait, and error types
//! that form the vocabulary of the release tracker domain.

mod errors;
mod ids;
mod scope;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{GroupId, MilestoneId, ProjectId, ReleaseId};
pub use scope::Scope;
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::{today, Timestamp};
