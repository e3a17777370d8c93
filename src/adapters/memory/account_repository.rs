//! In-memory account repository.
//!
//! Same contract as the PostgreSQL adapter: case-insensitive unique
//! usernames and version-checked updates. Used by tests and for running
//! the service locally without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, Username, VipStatus};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode};
use crate::ports::AccountRepository;

#[derive(Debug, Default)]
struct Store {
    accounts: HashMap<AccountId, Account>,
    /// Normalised username to id.
    by_username: HashMap<String, AccountId>,
}

/// In-memory storage for accounts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    store: Arc<RwLock<Store>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `ServiceUnavailable` (tests only).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.store.read().await.accounts.len()
    }

    /// Overwrites a stored account without a version check.
    ///
    /// Test fixture for arranging states the public workflow cannot
    /// reach quickly, such as an approval that lapsed yesterday.
    pub async fn put(&self, account: Account) {
        let mut store = self.store.write().await;
        store
            .by_username
            .insert(account.username.normalized().to_string(), account.id);
        store.accounts.insert(account.id, account);
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), DomainError> {
        self.ensure_available()?;
        let mut store = self.store.write().await;

        let key = account.username.normalized().to_string();
        if store.by_username.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUsername,
                "Username already exists",
            )
            .with_detail("username", account.username.as_str()));
        }

        store.by_username.insert(key, account.id);
        store.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<i64, DomainError> {
        self.ensure_available()?;
        let mut store = self.store.write().await;

        let stored = store.accounts.get_mut(&account.id).ok_or_else(|| {
            DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("key", account.id.to_string())
        })?;

        if stored.version != account.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Account {} is at version {}, update expected {}",
                    account.id, stored.version, account.version
                ),
            ));
        }

        let next_version = account.version + 1;
        *stored = Account {
            version: next_version,
            ..account.clone()
        };
        Ok(next_version)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        self.ensure_available()?;
        Ok(self.store.read().await.accounts.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.ensure_available()?;
        let store = self.store.read().await;
        Ok(store
            .by_username
            .get(&Username::normalize(username))
            .and_then(|id| store.accounts.get(id))
            .cloned())
    }

    async fn list_by_status(&self, status: VipStatus) -> Result<Vec<Account>, DomainError> {
        self.ensure_available()?;
        let store = self.store.read().await;
        let mut accounts: Vec<Account> = store
            .accounts
            .values()
            .filter(|a| a.vip_status == status)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| (a.vip_requested_at, a.created_at));
        Ok(accounts)
    }
}
