//! Account domain events.
//!
//! Every VIP status change emits exactly one event. Events are published
//! after the change has been persisted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, DomainEvent, EventId, Timestamp};

/// Events emitted by the `Account` aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    Registered {
        account_id: AccountId,
        username: String,
        occurred_at: Timestamp,
    },

    /// State transition: none | rejected | expired → pending
    VipRequested {
        account_id: AccountId,
        username: String,
        deposit_name: String,
        occurred_at: Timestamp,
    },

    /// State transition: pending → approved
    VipApproved {
        account_id: AccountId,
        username: String,
        vip_expiry: Timestamp,
        occurred_at: Timestamp,
    },

    /// State transition: pending → rejected
    VipRejected {
        account_id: AccountId,
        username: String,
        occurred_at: Timestamp,
    },

    /// State transition: approved → expired (observed lazily on read)
    VipExpired {
        account_id: AccountId,
        username: String,
        expired_at: Timestamp,
        occurred_at: Timestamp,
    },
}

impl AccountEvent {
    pub fn account_id(&self) -> AccountId {
        match self {
            AccountEvent::Registered { account_id, .. }
            | AccountEvent::VipRequested { account_id, .. }
            | AccountEvent::VipApproved { account_id, .. }
            | AccountEvent::VipRejected { account_id, .. }
            | AccountEvent::VipExpired { account_id, .. } => *account_id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            AccountEvent::Registered { username, .. }
            | AccountEvent::VipRequested { username, .. }
            | AccountEvent::VipApproved { username, .. }
            | AccountEvent::VipRejected { username, .. }
            | AccountEvent::VipExpired { username, .. } => username,
        }
    }
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::Registered { .. } => "account.registered.v1",
            AccountEvent::VipRequested { .. } => "vip.requested.v1",
            AccountEvent::VipApproved { .. } => "vip.approved.v1",
            AccountEvent::VipRejected { .. } => "vip.rejected.v1",
            AccountEvent::VipExpired { .. } => "vip.expired.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        self.account_id().to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Account"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            AccountEvent::Registered { occurred_at, .. }
            | AccountEvent::VipRequested { occurred_at, .. }
            | AccountEvent::VipApproved { occurred_at, .. }
            | AccountEvent::VipRejected { occurred_at, .. }
            | AccountEvent::VipExpired { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        EventId::new()
    }
}
