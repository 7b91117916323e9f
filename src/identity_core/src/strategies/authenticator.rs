use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;

use crate::domain::user::PersistedUser;

/// Raw login credentials exactly as the client sent them.
///
/// They are deliberately not validated value objects: a malformed email is
/// simply a user that does not exist.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(alias = "username")]
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Verifies credentials against the account store.
///
/// The three possible outcomes are a strategy failure (`Err`), no matching
/// account (`Ok(None)`), or the matching account (`Ok(Some(user))`). The
/// account's verification flag is not inspected here.
#[async_trait]
pub trait AuthenticationStrategy: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<Option<PersistedUser>, Self::Error>;
}
