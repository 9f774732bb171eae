//! Release Tracker - Milestones, releases, and the links between them
//!
//! Milestones move through `CREATED -> IN_PROGRESS -> COMPLETED`. Releases
//! can be linked to one in-progress milestone at a time. Titles and versions
//! are unique within a project, a group, or the global scope.
//!
//! The crate follows a hexagonal layout: `domain` holds the rules, `ports`
//! the storage contracts, `application` one handler per operation, and
//! `adapters` the in-memory, PostgreSQL, and HTTP implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
