//! GetAccountHandler - Query handler for the caller's own account.

use crate::application::{AccountLookup, ExpiryGuard};
use crate::domain::account::{AccountError, AccountView, AdminPolicy};
use crate::domain::foundation::{AccountId, Timestamp};

#[derive(Debug, Clone)]
pub struct GetAccountQuery {
    pub account_id: AccountId,
}

pub struct GetAccountHandler {
    guard: ExpiryGuard,
    policy: AdminPolicy,
}

impl GetAccountHandler {
    pub fn new(guard: ExpiryGuard, policy: AdminPolicy) -> Self {
        Self { guard, policy }
    }

    pub async fn handle(&self, query: GetAccountQuery) -> Result<AccountView, AccountError> {
        let now = Timestamp::now();
        let account = self
            .guard
            .load(AccountLookup::Id(query.account_id), now)
            .await?
            .ok_or_else(|| AccountError::not_found(query.account_id.to_string()))?;

        Ok(self.policy.view(&account, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{lapsed_vip, regular_account, Fixture, SUPER_ADMIN};
    use crate::domain::account::{MembershipTier, VipStatus};

    fn handler(fx: &Fixture) -> GetAccountHandler {
        GetAccountHandler::new(fx.guard(), fx.policy.clone())
    }

    #[tokio::test]
    async fn returns_view_of_stored_account() {
        let fx = Fixture::new();
        let account = fx.seed(regular_account("eve")).await;

        let view = handler(&fx)
            .handle(GetAccountQuery { account_id: account.id })
            .await
            .unwrap();

        assert_eq!(view.username, "eve");
        assert_eq!(view.vip_status, VipStatus::None);
    }

    #[tokio::test]
    async fn lapsed_vip_reads_as_regular() {
        let fx = Fixture::new();
        let account = fx.seed(lapsed_vip("fay")).await;

        let view = handler(&fx)
            .handle(GetAccountQuery { account_id: account.id })
            .await
            .unwrap();

        assert_eq!(view.tier, MembershipTier::Regular);
        assert_eq!(view.vip_status, VipStatus::Expired);
        assert_eq!(view.days_remaining, None);
    }

    #[tokio::test]
    async fn super_admin_reads_as_vip() {
        let fx = Fixture::new();
        let admin = fx.seed(regular_account(SUPER_ADMIN)).await;

        let view = handler(&fx)
            .handle(GetAccountQuery { account_id: admin.id })
            .await
            .unwrap();

        assert!(view.is_vip);
        assert_eq!(view.tier, MembershipTier::Vip);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let fx = Fixture::new();
        let err = handler(&fx)
            .handle(GetAccountQuery { account_id: AccountId::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }
}
