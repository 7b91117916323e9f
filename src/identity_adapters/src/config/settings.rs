use std::path::Path;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{self, env, prod};

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    pub verification: VerificationSettings,
    pub email_client: EmailClientSettings,
    pub postgres: Option<PostgresSettings>,
    pub redis: Option<RedisSettings>,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    pub secure_cookie: bool,
}

impl SessionSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    /// Public URL of the service; the mailed link points at `<base>/verify-email`.
    pub link_base_url: String,
    pub token_ttl_seconds: u64,
}

impl VerificationSettings {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

/// Origins allowed to make credentialed cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IdentitySettings {
    /// Load `.env`, then the layered configuration from `IDENTITY_CONFIG_DIR`
    /// (or `./config`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_DIR.to_string());
        Self::load_from(dir)
    }

    /// Defaults, then `<dir>/base.json` if present, then `IDENTITY__*` variables.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = dir.as_ref().join("base");
        let base = base.to_string_lossy();

        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("session.cookie_name", constants::SESSION_COOKIE_NAME)?
            .set_default("session.ttl_seconds", constants::SESSION_TTL_SECONDS)?
            .set_default("session.secure_cookie", true)?
            .set_default(
                "verification.link_base_url",
                prod::VERIFICATION_LINK_BASE_URL,
            )?
            .set_default(
                "verification.token_ttl_seconds",
                constants::VERIFICATION_TOKEN_TTL_SECONDS,
            )?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default("email_client.auth_token", "")?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .add_source(File::with_name(&base).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .separator(env::ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
