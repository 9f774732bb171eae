//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, scope, timestamps, state machine, errors)
//! - `validation` - Stateless input rules shared by milestones and releases
//! - `milestone` - Milestone aggregate and lifecycle
//! - `release` - Release aggregate and its milestone link
//! - `errors` - The tracker error taxonomy returned to callers

pub mod errors;
pub mod foundation;
pub mod milestone;
pub mod release;
pub mod validation;

pub use errors::{EntityRef, TrackerError};
