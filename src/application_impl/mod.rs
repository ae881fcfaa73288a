mod affinity_service_impl;
mod auth_service_fake;
mod auth_service_jwt;
mod relationship_service_impl;

pub use affinity_service_impl::*;
pub use auth_service_fake::*;
pub use auth_service_jwt::*;
pub use relationship_service_impl::*;
