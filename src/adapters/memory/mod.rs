//! In-memory adapters.

mod tracker_store;

pub use tracker_store::{InMemoryTrackerStore, InMemoryTransaction};
