//! Account handlers.
//!
//! ## Commands
//! - Registering a new account
//! - Logging in
//!
//! ## Queries
//! - Get the caller's account

mod get_account;
mod login;
mod register_account;

pub use get_account::{GetAccountHandler, GetAccountQuery};
pub use login::{LoginCommand, LoginHandler};
pub use register_account::{RegisterAccountCommand, RegisterAccountHandler};

use crate::domain::account::{Account, AccountError, AccountView};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{IssuedToken, TokenIssuer};

/// Account view plus a fresh session token.
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub account: AccountView,
    pub token: IssuedToken,
}

fn issue_session(tokens: &dyn TokenIssuer, account: &Account) -> Result<IssuedToken, AccountError> {
    let user = AuthenticatedUser::new(account.id, account.username.as_str());
    tokens
        .issue(&user)
        .map_err(|e| AccountError::infrastructure(e.to_string()))
}
