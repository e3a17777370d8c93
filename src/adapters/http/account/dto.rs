//! HTTP DTOs for account and VIP endpoints.
//!
//! Request bodies are deserialized here and handed to the application
//! layer as commands. Responses wrap `AccountView` so the JSON shape of an
//! account is defined in one place.

use serde::{Deserialize, Serialize};

use crate::application::SessionResult;
use crate::domain::account::AccountView;
use crate::domain::foundation::ErrorCode;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body for both registration and login.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Request to join the VIP review queue.
#[derive(Debug, Clone, Deserialize)]
pub struct VipRequestRequest {
    /// Name on the offline deposit, used by the admin to reconcile payment.
    pub deposit_name: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Account plus a bearer token, returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub account: AccountView,
    pub token: String,
    pub token_type: &'static str,
    /// RFC 3339.
    pub expires_at: String,
}

impl From<SessionResult> for SessionResponse {
    fn from(result: SessionResult) -> Self {
        Self {
            account: result.account,
            token: result.token.access_token,
            token_type: "Bearer",
            expires_at: result.token.expires_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingRequestsResponse {
    pub requests: Vec<AccountView>,
    pub total: usize,
}

impl From<Vec<AccountView>> for PendingRequestsResponse {
    fn from(requests: Vec<AccountView>) -> Self {
        Self {
            total: requests.len(),
            requests,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{pending_account, SUPER_ADMIN};
    use crate::domain::account::AdminPolicy;
    use crate::domain::foundation::Timestamp;
    use crate::ports::IssuedToken;

    #[test]
    fn credentials_request_deserializes() {
        let json = r#"{"username": "alba", "password": "s3cret"}"#;
        let req: CredentialsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alba");
        assert_eq!(req.password, "s3cret");
    }

    #[test]
    fn vip_request_requires_deposit_name() {
        let result: Result<VipRequestRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn session_response_carries_bearer_token() {
        let now = Timestamp::now();
        let view = AdminPolicy::new(SUPER_ADMIN).view(&pending_account("bo"), now);
        let response = SessionResponse::from(SessionResult {
            account: view,
            token: IssuedToken {
                access_token: "abc".to_string(),
                expires_at: now,
            },
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "abc");
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["account"]["username"], "bo");
        assert_eq!(json["account"]["vip_status"], "pending");
        assert_eq!(json["account"]["tier"], "regular");
    }

    #[test]
    fn error_response_uses_screaming_code() {
        let json = serde_json::to_value(ErrorResponse::new(ErrorCode::DuplicateUsername, "taken"))
            .unwrap();
        assert_eq!(json["code"], "DUPLICATE_USERNAME");
        assert_eq!(json["message"], "taken");
    }
}
