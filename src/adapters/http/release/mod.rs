//! HTTP adapter for release and association endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateReleaseRequest, ListReleasesQuery, ReleaseCommandResponse, ReleaseListResponse,
    ReleaseResponse,
};
pub use handlers::ReleaseHandlers;
pub use routes::release_routes;
