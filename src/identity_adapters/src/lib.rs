pub mod authentication;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod sessions;

pub use authentication::{CredentialStore, LocalStrategy, LocalStrategyError, PasswordRecord};
pub use email::{MockEmailClient, PostmarkEmailClient, QueuedVerificationMailer};
pub use http::SessionCookie;
pub use persistence::{
    HashMapVerificationTokenStore, InMemoryUserRepository, MIGRATOR, PostgresUserRepository,
    RedisVerificationTokenStore,
};
pub use sessions::{DashMapSessionStore, RedisSessionStore};
