//! Account domain module.
//!
//! Registration, credentials and the manual VIP approval workflow.
//!
//! # Module Structure
//!
//! - `aggregate` - Account aggregate entity
//! - `status` - VipStatus state machine
//! - `tier` - MembershipTier levels
//! - `admin` - Super-admin policy and account view
//! - `username`, `credentials`, `deposit_name` - Validated value objects

mod admin;
mod aggregate;
mod credentials;
mod deposit_name;
mod errors;
mod events;
mod status;
mod tier;
mod username;

pub use admin::{AccountView, AdminPolicy};
pub use aggregate::Account;
pub use credentials::{Password, PasswordHash};
pub use deposit_name::DepositName;
pub use errors::AccountError;
pub use events::AccountEvent;
pub use status::VipStatus;
pub use tier::MembershipTier;
pub use username::Username;
