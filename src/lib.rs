//! VIP Membership - account authentication and manual VIP approval.
//!
//! Users register and log in with a username and password. A regular
//! member can ask for VIP by naming the offline deposit they made; the
//! super-admin reconciles the deposit and approves or rejects the request.
//! Approved VIP lasts a fixed number of days and lapses back to regular on
//! the first read after expiry.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
