//! Password value objects.
//!
//! `Password` wraps a plaintext candidate that only lives long enough to be
//! hashed or verified. `PasswordHash` is what gets persisted.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MIN_LEN: usize = 4;
/// bcrypt ignores everything past its 72nd input byte.
const MAX_BYTES: usize = 72;

/// Plaintext password supplied by a caller.
pub struct Password(SecretString);

impl Password {
    /// Validates length: at least 4 characters and at most 72 bytes of
    /// UTF-8. Whitespace is significant.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if len == 0 {
            return Err(ValidationError::empty_field("password"));
        }
        if len < MIN_LEN {
            return Err(ValidationError::length_out_of_range(
                "password", MIN_LEN, MAX_BYTES, len,
            ));
        }
        if raw.len() > MAX_BYTES {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at most {} bytes", MAX_BYTES),
            ));
        }
        Ok(Self(SecretString::new(raw)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Salted one-way hash of a password, in the hasher's encoded form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}
