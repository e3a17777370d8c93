//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AccountRepository` - Account persistence (write and read)
//! - `PasswordHasher` - One-way credential hashing
//! - `TokenIssuer` / `SessionValidator` - Session token lifecycle
//! - `EventPublisher` - Domain event publication
//! - `RateLimiter` - Login attempt throttling

mod account_repository;
mod event_publisher;
mod password_hasher;
mod rate_limiter;
mod session_validator;
mod token_issuer;

pub use account_repository::AccountRepository;
pub use event_publisher::EventPublisher;
pub use password_hasher::PasswordHasher;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitScope,
    RateLimitStatus, RateLimiter,
};
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
