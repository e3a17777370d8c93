//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bcrypt password hashing and JWT sessions
//! - `events` - Event publishers (in-memory, tracing)
//! - `http` - axum REST API
//! - `memory` - In-memory account repository
//! - `postgres` - PostgreSQL account repository
//! - `rate_limiter` - Login throttling

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod rate_limiter;

pub use auth::{BcryptPasswordHasher, JwtSessionManager};
pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use memory::InMemoryAccountRepository;
pub use postgres::PostgresAccountRepository;
pub use rate_limiter::InMemoryRateLimiter;
