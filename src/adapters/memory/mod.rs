//! In-process adapters for tests and local development.

mod account_repository;

pub use account_repository::InMemoryAccountRepository;
