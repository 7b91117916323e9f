use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// A user-supplied password, kept out of logs and debug output.
///
/// No strength policy is applied here; hashing and storage belong to the
/// repository. The only structural rule is that the password is not empty.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn create(raw: Secret<String>) -> Result<Self, UserError> {
        if raw.expose_secret().is_empty() {
            return Err(UserError::EmptyPassword);
        }

        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}
