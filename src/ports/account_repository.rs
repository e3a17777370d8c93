//! Account repository port.
//!
//! Defines the contract for persisting and retrieving Account aggregates.
//! Every implementation must honour the same semantics, so the in-memory
//! adapter can stand in for PostgreSQL in tests.
//!
//! # Example
//!
//! ```ignore
//! let mut account = repo.find_by_username("Alice").await?.ok_or(...)?;
//! if let Some(event) = account.expire_if_due(Timestamp::now()) {
//!     account.version = repo.update(&account).await?;
//!     publisher.publish(event.to_envelope()).await?;
//! }
//! ```

use async_trait::async_trait;

use crate::domain::account::{Account, VipStatus};
use crate::domain::foundation::{AccountId, DomainError};

/// Repository port for Account aggregate persistence.
///
/// Implementations must ensure:
/// - Usernames are unique after lower-casing
/// - Lookups by username ignore case
/// - Updates are conditional on the stored `version`
/// - Backend outages surface as `ErrorCode::ServiceUnavailable`
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Save a new account.
    ///
    /// # Errors
    ///
    /// - `DuplicateUsername` if the username exists in any casing. Nothing
    ///   is written in that case.
    /// - `ServiceUnavailable` on persistence failure
    async fn insert(&self, account: &Account) -> Result<(), DomainError>;

    /// Persist changes to an existing account.
    ///
    /// The write only happens if the stored row still has
    /// `account.version`. The row is written with `account.version + 1`,
    /// which is returned.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the stored version differs
    /// - `AccountNotFound` if the account does not exist
    /// - `ServiceUnavailable` on persistence failure
    async fn update(&self, account: &Account) -> Result<i64, DomainError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError>;

    /// Find an account by username, ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// All accounts with the given status, oldest request first.
    async fn list_by_status(&self, status: VipStatus) -> Result<Vec<Account>, DomainError>;
}
