//! Account-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | InvalidCredentials | 401 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | DuplicateUsername | 409 |
//! | InvalidState | 409 |
//! | ConcurrentModification | 409 |
//! | RateLimited | 429 |
//! | Infrastructure | 500 |
//! | ServiceUnavailable | 503 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors returned by account and VIP workflow handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No account matches the given username or id.
    NotFound(String),

    /// Username already taken, compared case-insensitively.
    DuplicateUsername(String),

    /// Unknown username or wrong password. Deliberately indistinguishable.
    InvalidCredentials,

    /// Requested VIP transition is not allowed from the current status.
    InvalidState { current: String, attempted: String },

    /// Caller is not the super-admin.
    Forbidden,

    /// Too many login attempts for this username.
    RateLimited { retry_after_secs: u64 },

    /// The record changed between read and write.
    ConcurrentModification,

    ValidationFailed { field: String, message: String },

    /// Persistence backend unreachable.
    ServiceUnavailable(String),

    Infrastructure(String),
}

impl AccountError {
    pub fn not_found(key: impl Into<String>) -> Self {
        AccountError::NotFound(key.into())
    }

    pub fn duplicate_username(username: impl Into<String>) -> Self {
        AccountError::DuplicateUsername(username.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        AccountError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::NotFound(_) => ErrorCode::AccountNotFound,
            AccountError::DuplicateUsername(_) => ErrorCode::DuplicateUsername,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            AccountError::Forbidden => ErrorCode::Forbidden,
            AccountError::RateLimited { .. } => ErrorCode::RateLimited,
            AccountError::ConcurrentModification => ErrorCode::ConcurrentModification,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            AccountError::NotFound(key) => format!("Account not found: {}", key),
            AccountError::DuplicateUsername(username) => {
                format!("Username '{}' is already taken", username)
            }
            AccountError::InvalidCredentials => "Invalid username or password".to_string(),
            AccountError::InvalidState { current, attempted } => {
                format!("Cannot {} a VIP request in {} state", attempted, current)
            }
            AccountError::Forbidden => "Only the administrator may do this".to_string(),
            AccountError::RateLimited { retry_after_secs } => format!(
                "Too many login attempts, retry in {} seconds",
                retry_after_secs
            ),
            AccountError::ConcurrentModification => {
                "Account was modified concurrently, please retry".to_string()
            }
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::ServiceUnavailable(_) => "Service temporarily unavailable".to_string(),
            AccountError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::AccountNotFound => AccountError::NotFound(detail("key")),
            ErrorCode::DuplicateUsername => AccountError::DuplicateUsername(detail("username")),
            ErrorCode::InvalidStateTransition => AccountError::InvalidState {
                current: detail("current"),
                attempted: detail("attempted"),
            },
            ErrorCode::ConcurrentModification => AccountError::ConcurrentModification,
            ErrorCode::InvalidCredentials => AccountError::InvalidCredentials,
            ErrorCode::Forbidden => AccountError::Forbidden,
            ErrorCode::ValidationFailed => AccountError::ValidationFailed {
                field: detail("field"),
                message: err.message.clone(),
            },
            ErrorCode::ServiceUnavailable => AccountError::ServiceUnavailable(err.message.clone()),
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AccountError> for DomainError {
    fn from(err: AccountError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_line_up_with_variants() {
        assert_eq!(AccountError::not_found("x").code(), ErrorCode::AccountNotFound);
        assert_eq!(AccountError::Forbidden.code(), ErrorCode::Forbidden);
        assert_eq!(
            AccountError::RateLimited { retry_after_secs: 5 }.code(),
            ErrorCode::RateLimited
        );
        assert_eq!(
            AccountError::infrastructure("boom").code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn infrastructure_message_hides_detail() {
        let err = AccountError::infrastructure("password column missing");
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn invalid_state_message_names_both_sides() {
        let err = AccountError::invalid_state("approved", "approve");
        assert_eq!(err.message(), "Cannot approve a VIP request in approved state");
    }

    #[test]
    fn from_domain_error_reads_transition_details() {
        let err = DomainError::new(ErrorCode::InvalidStateTransition, "nope")
            .with_detail("current", "rejected")
            .with_detail("attempted", "approve");

        assert_eq!(
            AccountError::from(err),
            AccountError::invalid_state("rejected", "approve")
        );
    }

    #[test]
    fn from_domain_error_keeps_unavailability() {
        let err = AccountError::from(DomainError::unavailable("pool timed out"));
        assert_eq!(err, AccountError::ServiceUnavailable("pool timed out".into()));
    }

    #[test]
    fn from_domain_error_maps_version_conflicts() {
        let err = DomainError::new(ErrorCode::ConcurrentModification, "stale");
        assert_eq!(AccountError::from(err), AccountError::ConcurrentModification);
    }

    #[test]
    fn from_validation_error_keeps_field() {
        let err = AccountError::from(ValidationError::empty_field("deposit_name"));
        assert!(matches!(
            err,
            AccountError::ValidationFailed { ref field, .. } if field == "deposit_name"
        ));
    }

    #[test]
    fn round_trips_into_domain_error() {
        let domain: DomainError = AccountError::duplicate_username("Ann").into();
        assert_eq!(domain.code, ErrorCode::DuplicateUsername);
        assert!(domain.message.contains("Ann"));
    }
}
