use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use identity_core::{
    Password, PersistedUser, User, UserEmail, UserId, UserRepository, UserRepositoryError,
};
use secrecy::Secret;
use tokio::sync::RwLock;

use super::password_hashing::compute_password_hash;
use crate::authentication::{CredentialStore, PasswordRecord};

#[derive(Clone)]
struct StoredUser {
    user: PersistedUser,
    password_hash: Secret<String>,
}

/// Process-local user repository. Uniqueness is enforced under the write lock.
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserEmail, StoredUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError> {
        Ok(self.users.read().await.contains_key(email))
    }

    #[tracing::instrument(name = "Adding user to memory", skip_all)]
    async fn create(
        &self,
        user: User,
        password: Password,
    ) -> Result<PersistedUser, UserRepositoryError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserRepositoryError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users.contains_key(user.username()) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let email = user.username().clone();
        let persisted = PersistedUser::new(UserId::new(), user, Utc::now());
        users.insert(
            email,
            StoredUser {
                user: persisted.clone(),
                password_hash,
            },
        );

        Ok(persisted)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<PersistedUser>, UserRepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }

    async fn mark_verified(&self, id: &UserId) -> Result<PersistedUser, UserRepositoryError> {
        let mut users = self.users.write().await;
        let stored = users
            .values_mut()
            .find(|stored| stored.user.id() == id)
            .ok_or(UserRepositoryError::UserNotFound)?;

        stored.user.verify();
        Ok(stored.user.clone())
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryUserRepository {
    async fn password_record(
        &self,
        email: &UserEmail,
    ) -> Result<Option<PasswordRecord>, UserRepositoryError> {
        Ok(self.users.read().await.get(email).map(|stored| PasswordRecord {
            user: stored.user.clone(),
            password_hash: stored.password_hash.clone(),
        }))
    }
}
