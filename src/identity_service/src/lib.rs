mod helpers;
mod identity_service;
mod tracing;

pub use helpers::{configure_postgresql, configure_redis, get_redis_client};
pub use identity_service::IdentityService;
