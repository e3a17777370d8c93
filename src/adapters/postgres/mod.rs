//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAccountRepository` - Account persistence backed by `accounts`

mod account_repository;

pub use account_repository::PostgresAccountRepository;
