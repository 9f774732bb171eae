//! Release domain module.

mod aggregate;

pub use aggregate::Release;
