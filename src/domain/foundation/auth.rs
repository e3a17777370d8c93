//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what a validated session token resolves to. It
//! carries only the claims handlers actually use. Whatever issues tokens
//! populates it through the `SessionValidator` port.

use super::AccountId;
use thiserror::Error;

/// Caller identity extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Account the token was issued for.
    pub account_id: AccountId,

    /// Username as it was registered (original casing).
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(account_id: AccountId, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
        }
    }
}

/// Authentication errors that can occur during token handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// A token could not be produced.
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
