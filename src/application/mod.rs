//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate the account aggregate and the ports. Reads go
//! through the [`ExpiryGuard`] so lazy expiry is enforced in one place.

mod expiry_guard;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use expiry_guard::{AccountLookup, ExpiryGuard};
pub use handlers::{
    ApproveVipCommand, ApproveVipHandler, GetAccountHandler, GetAccountQuery,
    ListPendingRequestsHandler, ListPendingRequestsQuery, LoginCommand, LoginHandler,
    RegisterAccountCommand, RegisterAccountHandler, RejectVipCommand, RejectVipHandler,
    RequestVipCommand, RequestVipHandler, SessionResult,
};

use tracing::warn;

use crate::domain::account::AccountEvent;
use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};
use crate::ports::EventPublisher;

/// Publishes an event for a change that is already persisted.
///
/// A publish failure cannot undo the change, so it is logged, not returned.
pub(crate) async fn publish_event(publisher: &dyn EventPublisher, event: &AccountEvent) {
    if let Err(e) = publisher.publish(event.to_envelope()).await {
        warn!(
            event_type = event.event_type(),
            account_id = %event.account_id(),
            error = %e,
            "Failed to publish account event"
        );
    }
}
