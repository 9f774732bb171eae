//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MilestoneRepository` - Milestone lookup and persistence
//! - `ReleaseRepository` - Release lookup, persistence, and the derived milestone link query
//! - `TrackerTransaction` - Both repositories bound to one atomic unit of work
//! - `TrackerStore` - Opens transactions

mod milestone_repository;
mod release_repository;
mod tracker_store;

pub use milestone_repository::{MilestoneFilter, MilestoneRepository};
pub use release_repository::{ReleaseFilter, ReleaseRepository};
pub use tracker_store::{TrackerStore, TrackerTransaction};
