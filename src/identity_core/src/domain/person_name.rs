use std::fmt;

use thiserror::Error;

pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("must not be empty")]
    Empty,
    #[error("must be at most {MAX_NAME_LENGTH} characters")]
    TooLong,
}

/// A first or last name: trimmed, non-empty and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn create(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(NameError::TooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(PersonName::create("  Ada ").unwrap().as_str(), "Ada");
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(PersonName::create(""), Err(NameError::Empty));
        assert_eq!(PersonName::create(" \t "), Err(NameError::Empty));
    }

    #[test]
    fn length_is_counted_in_characters() {
        let at_limit = "é".repeat(MAX_NAME_LENGTH);
        assert!(PersonName::create(&at_limit).is_ok());
        assert_eq!(
            PersonName::create(&format!("{at_limit}é")),
            Err(NameError::TooLong)
        );
    }

    #[quickcheck]
    fn accepted_names_are_already_trimmed(raw: String) -> bool {
        match PersonName::create(&raw) {
            Ok(name) => name.as_str() == name.as_str().trim() && !name.as_str().is_empty(),
            Err(_) => true,
        }
    }
}
