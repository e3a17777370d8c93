//! RequestVipHandler - Command handler for submitting a VIP request.

use std::sync::Arc;

use tracing::info;

use crate::application::{publish_event, AccountLookup, ExpiryGuard};
use crate::domain::account::{AccountError, AccountView, AdminPolicy, DepositName};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::{AccountRepository, EventPublisher};

/// Command to request VIP for the caller's own account.
#[derive(Debug, Clone)]
pub struct RequestVipCommand {
    pub account_id: AccountId,
    pub deposit_name: String,
}

pub struct RequestVipHandler {
    guard: ExpiryGuard,
    repository: Arc<dyn AccountRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    policy: AdminPolicy,
}

impl RequestVipHandler {
    pub fn new(
        guard: ExpiryGuard,
        repository: Arc<dyn AccountRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        policy: AdminPolicy,
    ) -> Self {
        Self {
            guard,
            repository,
            event_publisher,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RequestVipCommand) -> Result<AccountView, AccountError> {
        let deposit_name = DepositName::parse(&cmd.deposit_name)?;
        let now = Timestamp::now();

        let mut account = self
            .guard
            .load(AccountLookup::Id(cmd.account_id), now)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.account_id.to_string()))?;

        let event = account.request_vip(deposit_name, now)?;
        account.version = self.repository.update(&account).await?;

        info!(account_id = %account.id, username = %account.username, "VIP requested");
        publish_event(self.event_publisher.as_ref(), &event).await;

        Ok(self.policy.view(&account, now))
    }
}
