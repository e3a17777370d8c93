//! Shared fixtures for handler tests.

use std::sync::Arc;

use chrono::Duration;
use secrecy::SecretString;

use crate::adapters::auth::{BcryptPasswordHasher, JwtSessionManager};
use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::InMemoryAccountRepository;
use crate::adapters::rate_limiter::InMemoryRateLimiter;
use crate::domain::account::{Account, AdminPolicy, DepositName, PasswordHash, Username};
use crate::domain::foundation::Timestamp;
use crate::ports::PasswordHasher;

use super::ExpiryGuard;

pub const SUPER_ADMIN: &str = "1111";

pub fn regular_account(name: &str) -> Account {
    Account::register(
        Username::parse(name).unwrap(),
        PasswordHash::from_encoded("unused"),
        Timestamp::now(),
    )
}

pub fn pending_account(name: &str) -> Account {
    let mut account = regular_account(name);
    account
        .request_vip(DepositName::parse(name).unwrap(), Timestamp::now())
        .unwrap();
    account
}

/// VIP approved 31 days ago for 30 days.
pub fn lapsed_vip(name: &str) -> Account {
    let approved_at = Timestamp::now().minus_days(31);
    let mut account = regular_account(name);
    account
        .request_vip(DepositName::parse(name).unwrap(), approved_at)
        .unwrap();
    account.approve_vip(30, approved_at).unwrap();
    account
}

/// Real in-process adapters wired the way production wires them.
pub struct Fixture {
    pub repo: InMemoryAccountRepository,
    pub bus: Arc<InMemoryEventBus>,
    pub hasher: Arc<BcryptPasswordHasher>,
    pub tokens: Arc<JwtSessionManager>,
    pub limiter: Arc<InMemoryRateLimiter>,
    pub policy: AdminPolicy,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            repo: InMemoryAccountRepository::new(),
            bus: Arc::new(InMemoryEventBus::new()),
            hasher: Arc::new(BcryptPasswordHasher::new(4)),
            tokens: Arc::new(JwtSessionManager::new(
                &SecretString::new("fixture-secret-fixture-secret-fixture".to_string()),
                "vip-membership-test",
                Duration::hours(1),
            )),
            limiter: Arc::new(InMemoryRateLimiter::new(3, 60)),
            policy: AdminPolicy::new(SUPER_ADMIN),
        }
    }

    pub fn guard(&self) -> ExpiryGuard {
        ExpiryGuard::new(Arc::new(self.repo.clone()), self.bus.clone())
    }

    /// Stores `account` with `password` hashed into it.
    pub async fn seed_with_password(&self, mut account: Account, password: &str) -> Account {
        let password = crate::domain::account::Password::parse(password).unwrap();
        account.password_hash = self.hasher.hash(&password).await.unwrap();
        self.repo.put(account.clone()).await;
        account
    }

    pub async fn seed(&self, account: Account) -> Account {
        self.repo.put(account.clone()).await;
        account
    }
}
