pub mod repositories;
pub mod services;
pub mod sessions;
