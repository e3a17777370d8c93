//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `account` - Account registration and the VIP membership lifecycle

pub mod account;
pub mod foundation;
