use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::user::UserError;

/// Machine-readable tag of a [`UseCaseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    EmailInvalid,
    PasswordInvalid,
    EmailAlreadyInUse,
    UserInvalid,
    AuthenticationFailed,
    #[serde(rename = "USER_ACCOUNT_NOT_VERIFIED")]
    AccountNotVerified,
    VerificationTokenInvalid,
    SessionNotFound,
    UnexpectedError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailInvalid => "EMAIL_INVALID",
            Self::PasswordInvalid => "PASSWORD_INVALID",
            Self::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            Self::UserInvalid => "USER_INVALID",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::AccountNotVerified => "USER_ACCOUNT_NOT_VERIFIED",
            Self::VerificationTokenInvalid => "VERIFICATION_TOKEN_INVALID",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }

    /// Failures that mean "the caller is not who they claim to be".
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::AccountNotVerified | Self::SessionNotFound
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a use case can fail.
///
/// Use cases never surface collaborator errors directly: anything that is not one
/// of the named reasons is folded into [`UseCaseError::UnexpectedError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error("The email {0} is invalid")]
    EmailInvalid(String),
    #[error("The password is invalid")]
    PasswordInvalid,
    #[error("The email {0} associated for this account already exists")]
    EmailAlreadyInUse(String),
    #[error("User could not be created: {0}")]
    UserInvalid(String),
    #[error("Authorization failed!")]
    AuthenticationFailed,
    #[error("User account not verified!")]
    AccountNotVerified,
    #[error("Verification token is invalid or has expired")]
    VerificationTokenInvalid,
    #[error("No active session")]
    SessionNotFound,
    #[error("An unexpected error occurred: {0}")]
    UnexpectedError(String),
}

impl UseCaseError {
    pub fn unexpected(error: impl fmt::Display) -> Self {
        Self::UnexpectedError(error.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmailInvalid(_) => ErrorKind::EmailInvalid,
            Self::PasswordInvalid => ErrorKind::PasswordInvalid,
            Self::EmailAlreadyInUse(_) => ErrorKind::EmailAlreadyInUse,
            Self::UserInvalid(_) => ErrorKind::UserInvalid,
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            Self::AccountNotVerified => ErrorKind::AccountNotVerified,
            Self::VerificationTokenInvalid => ErrorKind::VerificationTokenInvalid,
            Self::SessionNotFound => ErrorKind::SessionNotFound,
            Self::UnexpectedError(_) => ErrorKind::UnexpectedError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<UserError> for UseCaseError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::InvalidEmail(email) => Self::EmailInvalid(email),
            UserError::EmptyPassword => Self::PasswordInvalid,
            UserError::InvalidFirstName(_) | UserError::InvalidLastName(_) => {
                Self::UserInvalid(error.to_string())
            }
        }
    }
}
