//! ApproveVipHandler - Super-admin approval of a pending VIP request.

use std::sync::Arc;

use tracing::info;

use crate::application::{publish_event, AccountLookup, ExpiryGuard};
use crate::domain::account::{AccountError, AccountView, AdminPolicy};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::{AccountRepository, EventPublisher};

use super::require_super_admin;

#[derive(Debug, Clone)]
pub struct ApproveVipCommand {
    pub actor: AuthenticatedUser,
    /// Matched case-insensitively.
    pub target_username: String,
}

pub struct ApproveVipHandler {
    guard: ExpiryGuard,
    repository: Arc<dyn AccountRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    policy: AdminPolicy,
    vip_duration_days: i64,
}

impl ApproveVipHandler {
    pub fn new(
        guard: ExpiryGuard,
        repository: Arc<dyn AccountRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        policy: AdminPolicy,
        vip_duration_days: i64,
    ) -> Self {
        Self {
            guard,
            repository,
            event_publisher,
            policy,
            vip_duration_days,
        }
    }

    pub async fn handle(&self, cmd: ApproveVipCommand) -> Result<AccountView, AccountError> {
        require_super_admin(&self.policy, &cmd.actor)?;
        let now = Timestamp::now();

        let mut account = self
            .guard
            .load(AccountLookup::Username(&cmd.target_username), now)
            .await?
            .ok_or_else(|| AccountError::not_found(cmd.target_username.as_str()))?;

        let event = account.approve_vip(self.vip_duration_days, now)?;
        account.version = self.repository.update(&account).await?;

        info!(
            account_id = %account.id,
            username = %account.username,
            approved_by = %cmd.actor.username,
            "VIP approved"
        );
        publish_event(self.event_publisher.as_ref(), &event).await;

        Ok(self.policy.view(&account, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        lapsed_vip, pending_account, regular_account, Fixture, SUPER_ADMIN,
    };
    use crate::domain::account::{MembershipTier, VipStatus};
    use crate::domain::foundation::AccountId;

    fn handler(fx: &Fixture) -> ApproveVipHandler {
        ApproveVipHandler::new(
            fx.guard(),
            Arc::new(fx.repo.clone()),
            fx.bus.clone(),
            fx.policy.clone(),
            30,
        )
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), SUPER_ADMIN)
    }

    fn cmd(actor: AuthenticatedUser, target: &str) -> ApproveVipCommand {
        ApproveVipCommand {
            actor,
            target_username: target.to_string(),
        }
    }

    #[tokio::test]
    async fn approving_pending_request_grants_thirty_days() {
        let fx = Fixture::new();
        let account = fx.seed(pending_account("Kira")).await;

        let view = handler(&fx).handle(cmd(admin(), "kira")).await.unwrap();

        assert!(view.is_vip);
        assert_eq!(view.tier, MembershipTier::Vip);
        assert_eq!(view.vip_status, VipStatus::Approved);
        assert_eq!(view.days_remaining, Some(30));

        let stored = fx.repo.find_by_id(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.tier, MembershipTier::Vip);
        assert!(fx.bus.has_event("vip.approved.v1"));
    }

    #[tokio::test]
    async fn non_admin_is_forbidden_and_nothing_changes() {
        let fx = Fixture::new();
        let account = fx.seed(pending_account("lia")).await;
        let stranger = AuthenticatedUser::new(AccountId::new(), "lia");

        let err = handler(&fx).handle(cmd(stranger, "lia")).await.unwrap_err();

        assert_eq!(err, AccountError::Forbidden);
        let stored = fx.repo.find_by_id(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.vip_status, VipStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let fx = Fixture::new();
        let err = handler(&fx).handle(cmd(admin(), "ghost")).await.unwrap_err();
        assert_eq!(err, AccountError::not_found("ghost"));
    }

    #[tokio::test]
    async fn approving_without_request_is_invalid_state() {
        let fx = Fixture::new();
        fx.seed(regular_account("max")).await;

        let err = handler(&fx).handle(cmd(admin(), "max")).await.unwrap_err();
        assert_eq!(err, AccountError::invalid_state("none", "approve"));
    }

    #[tokio::test]
    async fn re_approving_is_invalid_state() {
        let fx = Fixture::new();
        fx.seed(pending_account("noa")).await;
        let handler = handler(&fx);

        handler.handle(cmd(admin(), "noa")).await.unwrap();
        let err = handler.handle(cmd(admin(), "noa")).await.unwrap_err();

        assert_eq!(err, AccountError::invalid_state("approved", "approve"));
        assert_eq!(fx.bus.events_of_type("vip.approved.v1").len(), 1);
    }

    #[tokio::test]
    async fn lapsed_approval_cannot_be_re_approved() {
        let fx = Fixture::new();
        fx.seed(lapsed_vip("ode")).await;

        let err = handler(&fx).handle(cmd(admin(), "ode")).await.unwrap_err();

        assert_eq!(err, AccountError::invalid_state("expired", "approve"));
        assert!(fx.bus.has_event("vip.expired.v1"));
    }
}
