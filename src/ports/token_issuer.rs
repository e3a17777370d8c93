//! Session token issuing port.
//!
//! The counterpart of [`SessionValidator`](super::SessionValidator): a
//! token issued here must validate there until it expires.

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: Timestamp,
}

/// Issues session tokens after successful registration or login.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// `AuthError::IssuanceFailed` if the token cannot be signed.
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError>;
}
