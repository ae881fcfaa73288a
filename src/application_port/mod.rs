mod affinity_service;
mod auth_service;
mod relationship_service;

pub use affinity_service::*;
pub use auth_service::*;
pub use relationship_service::*;
