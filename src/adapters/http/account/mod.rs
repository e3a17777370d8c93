//! HTTP adapter for account and VIP endpoints.
//!
//! - `POST /api/auth/register` - Create an account and start a session
//! - `POST /api/auth/login` - Start a session
//! - `GET /api/account` - Current account, after lazy expiry
//! - `POST /api/vip/request` - Submit a VIP request with a deposit name
//! - `GET /api/admin/vip/pending` - Pending requests (super-admin)
//! - `POST /api/admin/vip/:username/approve` - Approve (super-admin)
//! - `POST /api/admin/vip/:username/reject` - Reject (super-admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::account_router;
