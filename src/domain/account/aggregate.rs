//! Account aggregate entity.
//!
//! One account per username. The aggregate owns the VIP workflow: every
//! status change goes through [`VipStatus`]'s state machine and returns the
//! event describing it. Callers pass `now` so expiry is deterministic.

use crate::domain::foundation::{AccountId, DomainError, ErrorCode, StateMachine, Timestamp};

use super::{AccountEvent, DepositName, MembershipTier, PasswordHash, Username, VipStatus};

const SECS_PER_DAY: i64 = 86_400;

/// Account aggregate.
///
/// # Invariants
///
/// - `tier == Vip` implies `vip_status == Approved`
/// - `vip_expiry`, when set on a VIP account, was in the future at the
///   last check; reads downgrade the account otherwise
/// - `version` increases by one on every persisted change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub tier: MembershipTier,
    pub vip_status: VipStatus,

    /// End of the approved VIP period. `None` on a VIP account means
    /// the membership does not lapse.
    pub vip_expiry: Option<Timestamp>,

    /// Payer name from the latest VIP request.
    pub deposit_name: Option<DepositName>,

    pub vip_requested_at: Option<Timestamp>,
    pub vip_reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Optimistic-locking counter, compared by the repository on update.
    pub version: i64,
}

impl Account {
    /// Creates a new regular account that has never requested VIP.
    pub fn register(username: Username, password_hash: PasswordHash, now: Timestamp) -> Self {
        Self {
            id: AccountId::new(),
            username,
            password_hash,
            tier: MembershipTier::Regular,
            vip_status: VipStatus::None,
            vip_expiry: None,
            deposit_name: None,
            vip_requested_at: None,
            vip_reviewed_at: None,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Event announcing this account's creation.
    pub fn registered_event(&self) -> AccountEvent {
        AccountEvent::Registered {
            account_id: self.id,
            username: self.username.to_string(),
            occurred_at: self.created_at,
        }
    }

    /// Submits a VIP request for manual deposit reconciliation.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if a request is already pending or the
    /// account is currently approved.
    pub fn request_vip(
        &mut self,
        deposit_name: DepositName,
        now: Timestamp,
    ) -> Result<AccountEvent, DomainError> {
        self.transition_to(VipStatus::Pending, "request")?;
        self.tier = MembershipTier::Regular;
        self.vip_expiry = None;
        self.vip_requested_at = Some(now);
        self.vip_reviewed_at = None;
        self.updated_at = now;

        let event = AccountEvent::VipRequested {
            account_id: self.id,
            username: self.username.to_string(),
            deposit_name: deposit_name.to_string(),
            occurred_at: now,
        };
        self.deposit_name = Some(deposit_name);
        Ok(event)
    }

    /// Approves the pending request and grants VIP for `duration_days`.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` unless the request is pending.
    pub fn approve_vip(
        &mut self,
        duration_days: i64,
        now: Timestamp,
    ) -> Result<AccountEvent, DomainError> {
        self.transition_to(VipStatus::Approved, "approve")?;
        let expiry = now.add_days(duration_days);
        self.tier = MembershipTier::Vip;
        self.vip_expiry = Some(expiry);
        self.vip_reviewed_at = Some(now);
        self.updated_at = now;

        Ok(AccountEvent::VipApproved {
            account_id: self.id,
            username: self.username.to_string(),
            vip_expiry: expiry,
            occurred_at: now,
        })
    }

    /// Rejects the pending request. The account stays regular.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` unless the request is pending.
    pub fn reject_vip(&mut self, now: Timestamp) -> Result<AccountEvent, DomainError> {
        self.transition_to(VipStatus::Rejected, "reject")?;
        self.tier = MembershipTier::Regular;
        self.vip_expiry = None;
        self.vip_reviewed_at = Some(now);
        self.updated_at = now;

        Ok(AccountEvent::VipRejected {
            account_id: self.id,
            username: self.username.to_string(),
            occurred_at: now,
        })
    }

    /// Downgrades a lapsed VIP account.
    ///
    /// Returns `None` and leaves the account untouched unless it is VIP
    /// with `vip_expiry <= now`. The lapsed expiry is kept for display.
    pub fn expire_if_due(&mut self, now: Timestamp) -> Option<AccountEvent> {
        let expired_at = self.vip_expiry.filter(|expiry| *expiry <= now)?;
        if !self.tier.is_vip() {
            return None;
        }

        self.tier = MembershipTier::Regular;
        self.vip_status = VipStatus::Expired;
        self.updated_at = now;

        Some(AccountEvent::VipExpired {
            account_id: self.id,
            username: self.username.to_string(),
            expired_at,
            occurred_at: now,
        })
    }

    /// True if the stored record grants VIP at `now`.
    pub fn is_vip_at(&self, now: Timestamp) -> bool {
        self.tier.is_vip() && self.vip_expiry.map_or(true, |expiry| expiry > now)
    }

    /// Whole days of VIP left at `now`, rounded up.
    ///
    /// `None` when the account is not VIP or its membership has no expiry.
    pub fn days_remaining(&self, now: Timestamp) -> Option<u32> {
        if !self.is_vip_at(now) {
            return None;
        }
        let secs = self.vip_expiry?.duration_since(&now).num_seconds();
        let days = (secs + SECS_PER_DAY - 1) / SECS_PER_DAY;
        Some(u32::try_from(days).unwrap_or(u32::MAX))
    }

    fn transition_to(&mut self, target: VipStatus, action: &str) -> Result<(), DomainError> {
        self.vip_status = self.vip_status.transition_to(target).map_err(|err| {
            DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
                .with_detail("current", err.from.as_str())
                .with_detail("attempted", action)
        })?;
        Ok(())
    }
}
