//! HS256 JWT session tokens.
//!
//! Issues and validates the bearer tokens returned by register and login.
//! Validation checks the signature, issuer and expiry; the subject must be
//! an account id.

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, AuthError, AuthenticatedUser, Timestamp};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Claims we embed in session tokens.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Account id.
    sub: String,
    username: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and validates session tokens with a shared secret.
pub struct JwtSessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl JwtSessionManager {
    pub fn new(secret: &SecretString, issuer: impl Into<String>, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            issuer: issuer.into(),
            ttl,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtSessionManager {
    fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let expires_at = now.plus_secs(self.ttl.num_seconds());
        let claims = SessionClaims {
            sub: user.account_id.to_string(),
            username: user.username.clone(),
            iss: self.issuer.clone(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionManager {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let account_id: AccountId = data.claims.sub.parse().map_err(|_| {
            tracing::warn!("Token subject is not an account id");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(account_id, data.claims.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    fn manager() -> JwtSessionManager {
        JwtSessionManager::new(
            &secret("test-secret-that-is-at-least-32-bytes"),
            "vip-membership",
            Duration::hours(1),
        )
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(AccountId::new(), "Haneul")
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_user() {
        let manager = manager();
        let user = user();

        let token = manager.issue(&user).unwrap();
        let validated = manager.validate(&token.access_token).await.unwrap();

        assert_eq!(validated, user);
        assert!(token.expires_at > Timestamp::now());
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let other = JwtSessionManager::new(
            &secret("another-secret-that-is-at-least-32-bytes"),
            "vip-membership",
            Duration::hours(1),
        );
        let token = other.issue(&user()).unwrap();

        assert_eq!(
            manager().validate(&token.access_token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn token_from_other_issuer_is_rejected() {
        let other = JwtSessionManager::new(
            &secret("test-secret-that-is-at-least-32-bytes"),
            "someone-else",
            Duration::hours(1),
        );
        let token = other.issue(&user()).unwrap();

        assert_eq!(
            manager().validate(&token.access_token).await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        // Past the default 60s validation leeway.
        let stale = JwtSessionManager::new(
            &secret("test-secret-that-is-at-least-32-bytes"),
            "vip-membership",
            Duration::minutes(-5),
        );
        let token = stale.issue(&user()).unwrap();

        assert_eq!(
            manager().validate(&token.access_token).await,
            Err(AuthError::TokenExpired)
        );
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            manager().validate("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        );
    }
}
