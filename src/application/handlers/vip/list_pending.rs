//! ListPendingRequestsHandler - Pending VIP requests for reconciliation.

use std::sync::Arc;

use crate::domain::account::{AccountError, AccountView, AdminPolicy, VipStatus};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::AccountRepository;

use super::require_super_admin;

#[derive(Debug, Clone)]
pub struct ListPendingRequestsQuery {
    pub actor: AuthenticatedUser,
}

/// Lists pending requests, oldest first.
pub struct ListPendingRequestsHandler {
    repository: Arc<dyn AccountRepository>,
    policy: AdminPolicy,
}

impl ListPendingRequestsHandler {
    pub fn new(repository: Arc<dyn AccountRepository>, policy: AdminPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(
        &self,
        query: ListPendingRequestsQuery,
    ) -> Result<Vec<AccountView>, AccountError> {
        require_super_admin(&self.policy, &query.actor)?;
        let now = Timestamp::now();

        // Pending accounts are never VIP, so there is nothing to expire.
        let pending = self.repository.list_by_status(VipStatus::Pending).await?;
        Ok(pending
            .iter()
            .map(|account| self.policy.view(account, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{pending_account, regular_account, Fixture, SUPER_ADMIN};
    use crate::domain::foundation::AccountId;

    fn handler(fx: &Fixture) -> ListPendingRequestsHandler {
        ListPendingRequestsHandler::new(Arc::new(fx.repo.clone()), fx.policy.clone())
    }

    fn query(actor: &str) -> ListPendingRequestsQuery {
        ListPendingRequestsQuery {
            actor: AuthenticatedUser::new(AccountId::new(), actor),
        }
    }

    #[tokio::test]
    async fn lists_only_pending_requests() {
        let fx = Fixture::new();
        fx.seed(pending_account("tae")).await;
        fx.seed(regular_account("uma")).await;

        let views = handler(&fx).handle(query(SUPER_ADMIN)).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].username, "tae");
        assert_eq!(views[0].deposit_name.as_deref(), Some("tae"));
    }

    #[tokio::test]
    async fn non_admin_is_forbidden() {
        let fx = Fixture::new();
        let err = handler(&fx).handle(query("uma")).await.unwrap_err();
        assert_eq!(err, AccountError::Forbidden);
    }

    #[tokio::test]
    async fn empty_queue_is_empty_list() {
        let fx = Fixture::new();
        assert!(handler(&fx).handle(query(SUPER_ADMIN)).await.unwrap().is_empty());
    }
}
