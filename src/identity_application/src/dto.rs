//! Response shapes handed to the transport layer.
//!
//! Field names are part of the public contract. None of these types has a
//! password field.

use identity_core::PersistedUser;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponseDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&PersistedUser> for SignUpResponseDto {
    fn from(user: &PersistedUser) -> Self {
        Self {
            email: user.username().as_str().to_string(),
            first_name: user.user().first_name().to_string(),
            last_name: user.user().last_name().to_string(),
        }
    }
}

/// Public-safe view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_id: String,
}

impl From<&PersistedUser> for UserDto {
    fn from(user: &PersistedUser) -> Self {
        Self {
            first_name: user.user().first_name().to_string(),
            last_name: user.user().last_name().to_string(),
            email: user.username().as_str().to_string(),
            user_id: user.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseDto {
    #[serde(rename = "userDto")]
    pub user_dto: UserDto,
}
