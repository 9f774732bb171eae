//! Release command and query handlers.

mod create_release;
mod delete_release;
mod get_release;
mod list_releases;

pub use create_release::{CreateReleaseCommand, CreateReleaseHandler};
pub use delete_release::{DeleteReleaseCommand, DeleteReleaseHandler};
pub use get_release::{GetReleaseHandler, GetReleaseQuery};
pub use list_releases::ListReleasesHandler;
