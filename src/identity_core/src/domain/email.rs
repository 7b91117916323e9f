use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// A syntactically valid, normalized email address.
///
/// The only way to obtain a `UserEmail` is [`UserEmail::create`], so holding one
/// proves the address passed validation. Normalization trims surrounding
/// whitespace and lower-cases the address.
#[derive(Debug, Clone)]
pub struct UserEmail(Secret<String>);

impl UserEmail {
    pub fn create(raw: &str) -> Result<Self, UserError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty()
            || normalized.len() > MAX_EMAIL_LENGTH
            || !EMAIL_PATTERN.is_match(&normalized)
        {
            return Err(UserError::InvalidEmail(raw.to_string()));
        }

        Ok(Self(Secret::new(normalized)))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for UserEmail {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for UserEmail {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::create(value.expose_secret())
    }
}

impl PartialEq for UserEmail {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for UserEmail {}

impl Hash for UserEmail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
