use identity_core::{
    AuthenticationStrategy, Credentials, PersistedUser, UserEmail, UserRepositoryError,
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::persistence::password_hashing::verify_password_hash;

/// A stored account together with its password hash.
#[derive(Debug, Clone)]
pub struct PasswordRecord {
    pub user: PersistedUser,
    pub password_hash: Secret<String>,
}

/// Read access to password hashes, implemented by the user repositories.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn password_record(
        &self,
        email: &UserEmail,
    ) -> Result<Option<PasswordRecord>, UserRepositoryError>;
}

#[derive(Debug, Error)]
pub enum LocalStrategyError {
    #[error("Credential lookup failed: {0}")]
    Store(#[from] UserRepositoryError),
    #[error("Password verification failed: {0}")]
    Hashing(String),
}

/// Email + password authentication against a [`CredentialStore`].
#[derive(Clone)]
pub struct LocalStrategy<C: CredentialStore> {
    store: C,
}

impl<C: CredentialStore> LocalStrategy<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<C: CredentialStore> AuthenticationStrategy for LocalStrategy<C> {
    type Error = LocalStrategyError;

    #[tracing::instrument(name = "LocalStrategy::authenticate", skip_all)]
    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<Option<PersistedUser>, Self::Error> {
        // An address that cannot be an account is simply not found.
        let Ok(email) = UserEmail::create(credentials.email.expose_secret()) else {
            return Ok(None);
        };

        let Some(record) = self.store.password_record(&email).await? else {
            return Ok(None);
        };

        let matches = verify_password_hash(record.password_hash, credentials.password)
            .await
            .map_err(LocalStrategyError::Hashing)?;

        Ok(matches.then_some(record.user))
    }
}
