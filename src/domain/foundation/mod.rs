//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the state machine
//! trait that form the vocabulary of the membership domain.

mod auth;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::AccountId;
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
