//! Milestone domain module.
//!
//! Holds the `Milestone` aggregate and its three-state lifecycle.

mod aggregate;
mod state;

pub use aggregate::Milestone;
pub use state::{MilestoneState, UnknownMilestoneState};
