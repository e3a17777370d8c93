//! Password hashing port.

use async_trait::async_trait;

use crate::domain::account::{Password, PasswordHash};
use crate::domain::foundation::DomainError;

/// One-way, salted password hashing.
///
/// Hashing is deliberately slow, so implementations should keep the work
/// off the async executor.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, DomainError>;

    /// Returns `Ok(false)` for a wrong password. Errors are reserved for
    /// malformed hashes and hasher failures.
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, DomainError>;
}
