use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const SESSION_ID_LENGTH: usize = 48;
const VERIFICATION_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has invalid length")]
    InvalidLength,
    #[error("Token contains invalid characters")]
    InvalidCharacters,
}

fn random_alphanumeric(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn parse_alphanumeric(raw: &str, length: usize) -> Result<Secret<String>, TokenError> {
    if raw.len() != length {
        return Err(TokenError::InvalidLength);
    }
    if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TokenError::InvalidCharacters);
    }
    Ok(Secret::new(raw.to_string()))
}

/// Opaque identifier of a server-side session, delivered to clients in a cookie.
#[derive(Debug, Clone)]
pub struct SessionId(Secret<String>);

impl SessionId {
    pub fn new() -> Self {
        Self(Secret::new(random_alphanumeric(SESSION_ID_LENGTH)))
    }

    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        parse_alphanumeric(raw, SESSION_ID_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SessionId {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SessionId {}

/// Single-use token mailed to a new user to confirm ownership of the address.
#[derive(Debug, Clone)]
pub struct VerificationToken(Secret<String>);

impl VerificationToken {
    pub fn new() -> Self {
        Self(Secret::new(random_alphanumeric(VERIFICATION_TOKEN_LENGTH)))
    }

    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        parse_alphanumeric(raw, VERIFICATION_TOKEN_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for VerificationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for VerificationToken {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for VerificationToken {}
