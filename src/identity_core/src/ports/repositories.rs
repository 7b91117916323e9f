use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::UserEmail,
    password::Password,
    token::VerificationToken,
    user::{PersistedUser, User, UserId},
};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence of user accounts.
///
/// Implementations own password hashing and must enforce email uniqueness
/// atomically in `create`: the existence check performed by signup is advisory
/// and a concurrent signup can slip between the two calls.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn exists(&self, email: &UserEmail) -> Result<bool, UserRepositoryError>;
    async fn create(
        &self,
        user: User,
        password: Password,
    ) -> Result<PersistedUser, UserRepositoryError>;
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PersistedUser>, UserRepositoryError>;
    async fn mark_verified(&self, id: &UserId) -> Result<PersistedUser, UserRepositoryError>;
}

// VerificationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationTokenStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    async fn issue(&self, user_id: UserId) -> Result<VerificationToken, VerificationTokenStoreError>;

    /// The user a live token was issued for, leaving the token in place.
    async fn peek(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError>;

    /// Remove the token and return the user it was issued for. Unknown or
    /// expired tokens yield `None`.
    async fn consume(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<UserId>, VerificationTokenStoreError>;
}
