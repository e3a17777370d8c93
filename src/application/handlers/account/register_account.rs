//! RegisterAccountHandler - Command handler for creating accounts.

use std::sync::Arc;

use tracing::info;

use crate::application::publish_event;
use crate::domain::account::{Account, AccountError, AdminPolicy, Password, Username};
use crate::domain::foundation::Timestamp;
use crate::ports::{AccountRepository, EventPublisher, PasswordHasher, TokenIssuer};

use super::{issue_session, SessionResult};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub username: String,
    pub password: String,
}

/// Handler for account registration.
pub struct RegisterAccountHandler {
    repository: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    event_publisher: Arc<dyn EventPublisher>,
    policy: AdminPolicy,
}

impl RegisterAccountHandler {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        event_publisher: Arc<dyn EventPublisher>,
        policy: AdminPolicy,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            event_publisher,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RegisterAccountCommand) -> Result<SessionResult, AccountError> {
        // 1. Validate input
        let username = Username::parse(&cmd.username)?;
        let password = Password::parse(cmd.password)?;

        // 2. Reject taken usernames before paying for a hash
        if self
            .repository
            .find_by_username(username.normalized())
            .await?
            .is_some()
        {
            return Err(AccountError::duplicate_username(username.as_str()));
        }

        // 3. Create and persist; the repository catches registration races
        let hash = self.hasher.hash(&password).await?;
        let now = Timestamp::now();
        let account = Account::register(username, hash, now);
        self.repository.insert(&account).await?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        publish_event(self.event_publisher.as_ref(), &account.registered_event()).await;

        // 4. Open a session
        let token = issue_session(self.tokens.as_ref(), &account)?;

        Ok(SessionResult {
            account: self.policy.view(&account, now),
            token,
        })
    }
}
