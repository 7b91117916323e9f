pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSettings, EmailClientSettings, IdentitySettings, PostgresSettings,
    RedisSettings, SessionSettings, VerificationSettings,
};
