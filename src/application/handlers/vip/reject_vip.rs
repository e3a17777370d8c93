//! RejectVipHandler - Super-admin rejection of a pending VIP request.

use std::sync::Arc;

use tracing::info;

use crate::application::{publish_event, AccountLookup, ExpiryGuard};
use crate::domain::account::{AccountError, AccountView, AdminPolicy};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::{AccountRepository, EventPublisher};

use super::require_super_admin;

#[derive(Debug, Clone)]
pub struct RejectVipCommand {
    pub actor: AuthenticatedUser,
    pub target_username: String,
}

pub struct RejectVipHandler {
    guard: ExpiryGuard,
    repository: Arc<dyn AccountRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    policy: AdminPolicy,
}

impl RejectVipHandler {
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

    pub async fn handle(&self, cmd: RejectVipCommand) -> Result<AccountView, AccountError> {
        require_super_admin(&self.policy, &cmd.actor)?;
        let now = Timestamp::now();

        let mut account = self
            .guard
            .load(AccountLookup::Username(&cmd.target_username), now)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.target_username.as_str()))?;

        let event = account.reject_vip(now)?;
        account.version = self.repository.update(&account).await?;

        info!(
            account_id = %account.id,
            username = %account.username,
            rejected_by = %cmd.actor.username,
            "VIP rejected"
        );
        publish_event(self.event_publisher.as_ref(), &event).await;

        Ok(self.policy.view(&account, now))
    }
}
