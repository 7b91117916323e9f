use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::email::UserEmail;
use super::person_name::{NameError, PersonName};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("First name {0}")]
    InvalidFirstName(NameError),
    #[error("Last name {0}")]
    InvalidLastName(NameError),
}

/// Identifier generated by the repository when a user is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for UserId {
    type Error = uuid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw input for [`User::create`]. The username is already a validated value object.
#[derive(Debug, Clone)]
pub struct UserProps {
    pub username: UserEmail,
    pub first_name: String,
    pub last_name: String,
}

/// The user aggregate before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: UserEmail,
    first_name: PersonName,
    last_name: PersonName,
    verified: bool,
}

impl User {
    /// Build a new, unverified user.
    pub fn create(props: UserProps) -> Result<Self, UserError> {
        let first_name =
            PersonName::create(&props.first_name).map_err(UserError::InvalidFirstName)?;
        let last_name = PersonName::create(&props.last_name).map_err(UserError::InvalidLastName)?;

        Ok(Self {
            username: props.username,
            first_name,
            last_name,
            verified: false,
        })
    }

    /// Rebuild a user from stored fields, re-checking the names.
    pub fn restore(
        username: UserEmail,
        first_name: &str,
        last_name: &str,
        verified: bool,
    ) -> Result<Self, UserError> {
        let mut user = Self::create(UserProps {
            username,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })?;
        user.verified = verified;
        Ok(user)
    }

    pub fn username(&self) -> &UserEmail {
        &self.username
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn verify(&mut self) {
        self.verified = true;
    }
}

/// A user as returned by the repository, with its generated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUser {
    id: UserId,
    user: User,
    created_at: DateTime<Utc>,
}

impl PersistedUser {
    pub fn new(id: UserId, user: User, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn username(&self) -> &UserEmail {
        self.user.username()
    }

    pub fn is_verified(&self) -> bool {
        self.user.is_verified()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn verify(&mut self) {
        self.user.verify();
    }
}
