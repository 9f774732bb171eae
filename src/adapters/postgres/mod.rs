//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresTrackerStore` - Opens database transactions over milestones and releases
//!
//! The schema lives in `migrations/` at the crate root.

mod tracker_store;

pub use tracker_store::{PostgresTrackerStore, PostgresTransaction};
