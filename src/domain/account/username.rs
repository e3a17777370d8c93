//! Username value object.
//!
//! Usernames keep the casing they were registered with for display, but
//! every comparison goes through the lower-cased `normalized` key.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::foundation::ValidationError;

const MIN_LEN: usize = 1;
const MAX_LEN: usize = 32;

/// A validated, case-insensitive username.
#[derive(Debug, Clone)]
pub struct Username {
    display: String,
    normalized: String,
}

impl Username {
    /// Parses and validates a raw username.
    ///
    /// Surrounding whitespace is trimmed. The result must be 1 to 32
    /// characters with no inner whitespace or control characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let len = trimmed.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(ValidationError::length_out_of_range(
                "username", MIN_LEN, MAX_LEN, len,
            ));
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::invalid_format(
                "username",
                "must not contain whitespace or control characters",
            ));
        }

        Ok(Self {
            display: trimmed.to_string(),
            normalized: Self::normalize(trimmed),
        })
    }

    /// Lookup key for an arbitrary, unvalidated input.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// The username as originally registered.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Lower-cased key used for uniqueness and lookups.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Case-insensitive comparison against a raw string.
    pub fn matches(&self, raw: &str) -> bool {
        self.normalized == Self::normalize(raw)
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Username {}

impl Hash for Username {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}
