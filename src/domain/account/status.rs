//! VIP request status state machine.
//!
//! ```text
//! none ──► pending ──► approved ──► expired
//!             │                        │
//!             ▼                        │
//!          rejected ◄──── (resubmit) ──┘
//! ```
//!
//! `rejected` and `expired` may both move back to `pending` when the
//! account holder submits a new request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Where an account is in the manual VIP approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VipStatus {
    /// Never requested. Stored nulls are read as this.
    #[default]
    None,

    /// Waiting for an admin to reconcile the deposit.
    Pending,

    /// Deposit confirmed; tier is `vip` until expiry.
    Approved,

    /// Admin could not match the deposit.
    Rejected,

    /// Approval lapsed and the tier was downgraded.
    Expired,
}

impl VipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VipStatus::None => "none",
            VipStatus::Pending => "pending",
            VipStatus::Approved => "approved",
            VipStatus::Rejected => "rejected",
            VipStatus::Expired => "expired",
        }
    }

    /// Reads a nullable stored column.
    pub fn from_nullable(value: Option<&str>) -> Result<Self, ValidationError> {
        match value {
            Some(s) => s.parse(),
            Option::None => Ok(VipStatus::None),
        }
    }

    /// True when the account holder may submit a new request.
    pub fn accepts_request(&self) -> bool {
        self.can_transition_to(&VipStatus::Pending)
    }
}

impl fmt::Display for VipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(VipStatus::None),
            "pending" => Ok(VipStatus::Pending),
            "approved" => Ok(VipStatus::Approved),
            "rejected" => Ok(VipStatus::Rejected),
            "expired" => Ok(VipStatus::Expired),
            other => Err(ValidationError::invalid_format(
                "vip_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl StateMachine for VipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (VipStatus::None, VipStatus::Pending)
                | (VipStatus::Rejected, VipStatus::Pending)
                | (VipStatus::Expired, VipStatus::Pending)
                | (VipStatus::Pending, VipStatus::Approved)
                | (VipStatus::Pending, VipStatus::Rejected)
                | (VipStatus::Approved, VipStatus::Expired)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            VipStatus::None | VipStatus::Rejected | VipStatus::Expired => vec![VipStatus::Pending],
            VipStatus::Pending => vec![VipStatus::Approved, VipStatus::Rejected],
            VipStatus::Approved => vec![VipStatus::Expired],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [VipStatus; 5] = [
        VipStatus::None,
        VipStatus::Pending,
        VipStatus::Approved,
        VipStatus::Rejected,
        VipStatus::Expired,
    ];

    #[test]
    fn none_can_move_to_pending() {
        assert_eq!(
            VipStatus::None.transition_to(VipStatus::Pending),
            Ok(VipStatus::Pending)
        );
    }

    #[test]
    fn pending_can_be_approved_or_rejected() {
        assert!(VipStatus::Pending.can_transition_to(&VipStatus::Approved));
        assert!(VipStatus::Pending.can_transition_to(&VipStatus::Rejected));
    }

    #[test]
    fn pending_cannot_be_requested_again() {
        assert!(!VipStatus::Pending.accepts_request());
        assert!(VipStatus::Pending.transition_to(VipStatus::Pending).is_err());
    }

    #[test]
    fn approved_only_moves_to_expired() {
        assert_eq!(VipStatus::Approved.valid_transitions(), vec![VipStatus::Expired]);
        assert!(!VipStatus::Approved.accepts_request());
    }

    #[test]
    fn approval_is_only_reachable_from_pending() {
        for status in ALL {
            let allowed = status.can_transition_to(&VipStatus::Approved);
            assert_eq!(allowed, status == VipStatus::Pending, "from {}", status);
        }
    }

    #[test]
    fn rejected_and_expired_allow_resubmission() {
        assert!(VipStatus::Rejected.accepts_request());
        assert!(VipStatus::Expired.accepts_request());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn no_status_is_terminal() {
        assert!(ALL.iter().all(|s| !s.is_terminal()));
    }

    #[test]
    fn null_column_reads_as_none() {
        assert_eq!(VipStatus::from_nullable(Option::None), Ok(VipStatus::None));
        assert_eq!(VipStatus::from_nullable(Some("expired")), Ok(VipStatus::Expired));
        assert!(VipStatus::from_nullable(Some("cancelled")).is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<VipStatus>(), Ok(status));
        }
    }
}
