//! LoginHandler - Command handler for password login.
//!
//! Attempts are throttled per normalised username. Input that is not a
//! valid username is refused before it reaches the throttle. Unknown
//! usernames and wrong passwords produce the same `InvalidCredentials`
//! error.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{AccountLookup, ExpiryGuard};
use crate::domain::account::{AccountError, AdminPolicy, Password, Username};
use crate::domain::foundation::Timestamp;
use crate::ports::{PasswordHasher, RateLimitKey, RateLimitResult, RateLimiter, TokenIssuer};

use super::{issue_session, SessionResult};

/// Command to log in with username and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

pub struct LoginHandler {
    guard: ExpiryGuard,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    limiter: Arc<dyn RateLimiter>,
    policy: AdminPolicy,
}

impl LoginHandler {
    pub fn new(
        guard: ExpiryGuard,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        limiter: Arc<dyn RateLimiter>,
        policy: AdminPolicy,
    ) -> Self {
        Self {
            guard,
            hasher,
            tokens,
            limiter,
            policy,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<SessionResult, AccountError> {
        // 1. No account can exist under a name that fails validation
        let Ok(username) = Username::parse(&cmd.username) else {
            return Err(AccountError::InvalidCredentials);
        };
        let key = RateLimitKey::login(username.normalized());

        // 2. Throttle
        match self.limiter.check(key.clone()).await {
            Ok(RateLimitResult::Allowed(_)) => {}
            Ok(RateLimitResult::Denied(denied)) => {
                warn!(username = %key.identifier, "Login throttled");
                return Err(AccountError::RateLimited {
                    retry_after_secs: u64::from(denied.retry_after_secs),
                });
            }
            Err(e) => return Err(AccountError::ServiceUnavailable(e.to_string())),
        }

        // 3. A password that could never have been registered cannot match
        let Ok(password) = Password::parse(cmd.password) else {
            return Err(AccountError::InvalidCredentials);
        };

        // 4. Load through the expiry guard
        let now = Timestamp::now();
        let Some(account) = self
            .guard
            .load(AccountLookup::Username(username.as_str()), now)
            .await?
        else {
            warn!(username = %key.identifier, "Login for unknown username");
            return Err(AccountError::InvalidCredentials);
        };

        // 5. Verify
        if !self.hasher.verify(&password, &account.password_hash).await? {
            warn!(account_id = %account.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        if let Err(e) = self.limiter.reset(key).await {
            warn!(error = %e, "Failed to reset login throttle");
        }
        info!(account_id = %account.id, "Login succeeded");

        let token = issue_session(self.tokens.as_ref(), &account)?;
        Ok(SessionResult {
            account: self.policy.view(&account, now),
            token,
        })
    }
}
