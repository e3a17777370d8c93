//! Lazy VIP expiry enforcement.
//!
//! Every read of an account goes through [`ExpiryGuard::load`]. If the
//! stored record is a VIP whose expiry has passed, the guard downgrades
//! it, persists the downgrade with a version check and publishes
//! `VipExpired`, all before the caller sees the account. Readers racing
//! on the same stale record produce one downgrade: the losers re-read.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::account::{Account, AccountError};
use crate::domain::foundation::{AccountId, ErrorCode, Timestamp};
use crate::ports::{AccountRepository, EventPublisher};

use super::publish_event;

const MAX_ATTEMPTS: usize = 3;

/// How to find the account to load.
#[derive(Debug, Clone, Copy)]
pub enum AccountLookup<'a> {
    Id(AccountId),
    /// Matched case-insensitively.
    Username(&'a str),
}

#[derive(Clone)]
pub struct ExpiryGuard {
    repository: Arc<dyn AccountRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl ExpiryGuard {
    pub fn new(repository: Arc<dyn AccountRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Loads an account with lazy expiry applied as of `now`.
    ///
    /// # Errors
    ///
    /// `ConcurrentModification` if the record kept changing under us,
    /// otherwise whatever the repository reports.
    pub async fn load(
        &self,
        lookup: AccountLookup<'_>,
        now: Timestamp,
    ) -> Result<Option<Account>, AccountError> {
        for _ in 0..MAX_ATTEMPTS {
            let Some(mut account) = self.fetch(lookup).await? else {
                return Ok(None);
            };

            let Some(event) = account.expire_if_due(now) else {
                return Ok(Some(account));
            };

            match self.repository.update(&account).await {
                Ok(version) => {
                    account.version = version;
                    info!(
                        account_id = %account.id,
                        username = %account.username,
                        "VIP membership expired"
                    );
                    publish_event(self.publisher.as_ref(), &event).await;
                    return Ok(Some(account));
                }
                Err(e) if e.code == ErrorCode::ConcurrentModification => {
                    debug!(account_id = %account.id, "Expiry lost a write race, re-reading");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AccountError::ConcurrentModification)
    }

    async fn fetch(&self, lookup: AccountLookup<'_>) -> Result<Option<Account>, AccountError> {
        let found = match lookup {
            AccountLookup::Id(id) => self.repository.find_by_id(&id).await?,
            AccountLookup::Username(username) => self.repository.find_by_username(username).await?,
        };
        Ok(found)
    }
}
