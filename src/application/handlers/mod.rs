//! Command and query handlers.
//!
//! - `account` - Registration, login and reading the caller's account
//! - `vip` - VIP requests and super-admin review

pub mod account;
pub mod vip;

pub use account::{
    GetAccountHandler, GetAccountQuery, LoginCommand, LoginHandler, RegisterAccountCommand,
    RegisterAccountHandler, SessionResult,
};
pub use vip::{
    ApproveVipCommand, ApproveVipHandler, ListPendingRequestsHandler, ListPendingRequestsQuery,
    RejectVipCommand, RejectVipHandler, RequestVipCommand, RequestVipHandler,
};
