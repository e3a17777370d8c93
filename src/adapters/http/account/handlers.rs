//! HTTP handlers for account and VIP endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::{
    ApproveVipCommand, ApproveVipHandler, ExpiryGuard, GetAccountHandler, GetAccountQuery,
    ListPendingRequestsHandler, ListPendingRequestsQuery, LoginCommand, LoginHandler,
    RegisterAccountCommand, RegisterAccountHandler, RejectVipCommand, RejectVipHandler,
    RequestVipCommand, RequestVipHandler,
};
use crate::domain::account::{AccountError, AdminPolicy};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AccountRepository, EventPublisher, PasswordHasher, RateLimiter, SessionValidator,
    TokenIssuer,
};

use super::super::middleware::RequireAuth;
use super::dto::{
    CredentialsRequest, ErrorResponse, HealthResponse, PendingRequestsResponse, SessionResponse,
    VipRequestRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request. Handlers are built on demand from the
/// Arc-wrapped ports.
#[derive(Clone)]
pub struct AppState {
    pub account_repository: Arc<dyn AccountRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub login_limiter: Arc<dyn RateLimiter>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub admin_policy: AdminPolicy,
    pub vip_duration_days: i64,
}

impl AppState {
    fn expiry_guard(&self) -> ExpiryGuard {
        ExpiryGuard::new(self.account_repository.clone(), self.event_publisher.clone())
    }

    pub fn register_handler(&self) -> RegisterAccountHandler {
        RegisterAccountHandler::new(
            self.account_repository.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
            self.event_publisher.clone(),
            self.admin_policy.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.expiry_guard(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
            self.login_limiter.clone(),
            self.admin_policy.clone(),
        )
    }

    pub fn get_account_handler(&self) -> GetAccountHandler {
        GetAccountHandler::new(self.expiry_guard(), self.admin_policy.clone())
    }

    pub fn request_vip_handler(&self) -> RequestVipHandler {
        RequestVipHandler::new(
            self.expiry_guard(),
            self.account_repository.clone(),
            self.event_publisher.clone(),
            self.admin_policy.clone(),
        )
    }

    pub fn approve_vip_handler(&self) -> ApproveVipHandler {
        ApproveVipHandler::new(
            self.expiry_guard(),
            self.account_repository.clone(),
            self.event_publisher.clone(),
            self.admin_policy.clone(),
            self.vip_duration_days,
        )
    }

    pub fn reject_vip_handler(&self) -> RejectVipHandler {
        RejectVipHandler::new(
            self.expiry_guard(),
            self.account_repository.clone(),
            self.event_publisher.clone(),
            self.admin_policy.clone(),
        )
    }

    pub fn list_pending_handler(&self) -> ListPendingRequestsHandler {
        ListPendingRequestsHandler::new(
            self.account_repository.clone(),
            self.admin_policy.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Public Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let result = state
        .register_handler()
        .handle(RegisterAccountCommand {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(result))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let result = state
        .login_handler()
        .handle(LoginCommand {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(SessionResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Authenticated Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/account
pub async fn get_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_account_handler()
        .handle(GetAccountQuery {
            account_id: user.account_id,
        })
        .await?;

    Ok(Json(view))
}

/// POST /api/vip/request
pub async fn request_vip(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<VipRequestRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let view = state
        .request_vip_handler()
        .handle(RequestVipCommand {
            account_id: user.account_id,
            deposit_name: req.deposit_name,
        })
        .await?;

    Ok(Json(view))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/vip/pending
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let views = state
        .list_pending_handler()
        .handle(ListPendingRequestsQuery { actor: user })
        .await?;

    Ok(Json(PendingRequestsResponse::from(views)))
}

/// POST /api/admin/vip/:username/approve
pub async fn approve_vip(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .approve_vip_handler()
        .handle(ApproveVipCommand {
            actor: user,
            target_username: username,
        })
        .await?;

    Ok(Json(view))
}

/// POST /api/admin/vip/:username/reject
pub async fn reject_vip(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .reject_vip_handler()
        .handle(RejectVipCommand {
            actor: user,
            target_username: username,
        })
        .await?;

    Ok(Json(view))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for converting application errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(AccountError);

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(AccountError::from(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AccountError::validation("body", rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::Forbidden => StatusCode::FORBIDDEN,
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::DuplicateUsername(_)
            | AccountError::InvalidState { .. }
            | AccountError::ConcurrentModification => StatusCode::CONFLICT,
            AccountError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AccountError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal detail goes to the log, never to the client
        match &self.0 {
            AccountError::ServiceUnavailable(detail) => {
                error!(error = %detail, "Account store unavailable");
            }
            AccountError::Infrastructure(detail) => {
                error!(error = %detail, "Request failed");
            }
            _ => {}
        }

        let body = ErrorResponse::new(self.0.code(), self.0.message());
        let mut response = (status, Json(body)).into_response();

        if let AccountError::RateLimited { retry_after_secs } = self.0 {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
