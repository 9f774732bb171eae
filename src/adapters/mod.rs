//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process `TrackerStore` for tests and database-less runs
//! - `postgres` - sqlx-backed `TrackerStore`
//! - `http` - axum REST API over the application handlers

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryTrackerStore;
pub use postgres::PostgresTrackerStore;
