//! bcrypt implementation of the PasswordHasher port.
//!
//! Hashing runs on tokio's blocking pool; at production costs a single
//! hash takes tens of milliseconds.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::account::{Password, PasswordHash};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` is the bcrypt work factor, 4 to 31.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn hasher_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("Password hashing failed: {}", e))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, DomainError> {
        let secret = SecretString::new(password.expose().to_string());
        let cost = self.cost;

        let encoded = tokio::task::spawn_blocking(move || bcrypt::hash(secret.expose_secret(), cost))
            .await
            .map_err(hasher_error)?
            .map_err(hasher_error)?;

        Ok(PasswordHash::from_encoded(encoded))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, DomainError> {
        let secret = SecretString::new(password.expose().to_string());
        let encoded = hash.as_str().to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(secret.expose_secret(), &encoded))
            .await
            .map_err(hasher_error)?
            .map_err(hasher_error)
    }
}
