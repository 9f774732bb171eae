//! HTTP adapters - REST API implementations.
//!
//! Milestones and releases each have their own DTOs, handlers, and routes;
//! association endpoints live under the release routes since the release
//! owns the link.

mod error;
mod router;
mod scope_params;

pub mod milestone;
pub mod release;

pub use error::{handle_tracker_error, status_for, ErrorResponse};
pub use router::api_router;
