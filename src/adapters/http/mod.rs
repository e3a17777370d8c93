//! HTTP adapters - REST API implementations.

pub mod account;
pub mod middleware;
mod router;

pub use account::{account_router, ApiError, AppState};
pub use router::{app_router, HttpSettings};
