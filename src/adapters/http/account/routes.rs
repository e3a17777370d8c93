//! Axum router configuration for account and VIP endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::super::middleware::auth_middleware;
use super::handlers::{
    approve_vip, get_account, health, list_pending, login, register, reject_vip, request_vip,
    AppState,
};

/// Endpoints that need no session.
///
/// # Routes
/// - `GET /health`
/// - `POST /api/auth/register`
/// - `POST /api/auth/login`
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Endpoints behind bearer authentication.
///
/// # Routes
///
/// ## Account holder
/// - `GET /api/account`
/// - `POST /api/vip/request`
///
/// ## Super-admin
/// - `GET /api/admin/vip/pending`
/// - `POST /api/admin/vip/:username/approve`
/// - `POST /api/admin/vip/:username/reject`
pub fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/account", get(get_account))
        .route("/api/vip/request", post(request_vip))
        .route("/api/admin/vip/pending", get(list_pending))
        .route("/api/admin/vip/:username/approve", post(approve_vip))
        .route("/api/admin/vip/:username/reject", post(reject_vip))
        .route_layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
}

/// Create the complete account router with state applied.
pub fn account_router(state: AppState) -> Router {
    public_routes()
        .merge(protected_routes(&state))
        .with_state(state)
}
