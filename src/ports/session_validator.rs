//! Session validation port.
//!
//! HTTP middleware uses this to turn a bearer token into the caller's
//! identity. Implementations must check the signature, issuer and expiry.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AccountId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token == "expired" {
                return Err(AuthError::TokenExpired);
            }
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn validator_is_usable_as_trait_object() {
        let user = AuthenticatedUser::new(AccountId::new(), "jun");
        let mut tokens = HashMap::new();
        tokens.insert("good".to_string(), user.clone());
        let validator: Box<dyn SessionValidator> = Box::new(TestSessionValidator {
            tokens: RwLock::new(tokens),
        });

        assert_eq!(validator.validate("good").await, Ok(user));
        assert_eq!(validator.validate("bad").await, Err(AuthError::InvalidToken));
        assert_eq!(validator.validate("expired").await, Err(AuthError::TokenExpired));
    }
}
