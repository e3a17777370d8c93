//! Super-admin policy and the externally visible account view.

use serde::Serialize;

use crate::domain::foundation::{AccountId, Timestamp};

use super::{Account, MembershipTier, Username, VipStatus};

/// Identifies the single designated super-admin account.
///
/// The super-admin is always reported as VIP and is the only caller
/// allowed to review other accounts' VIP requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPolicy {
    super_admin: String,
}

impl AdminPolicy {
    pub fn new(super_admin_username: &str) -> Self {
        Self {
            super_admin: Username::normalize(super_admin_username),
        }
    }

    /// Case-insensitive check against the configured username.
    pub fn is_super_admin(&self, username: &str) -> bool {
        !self.super_admin.is_empty() && Username::normalize(username) == self.super_admin
    }

    /// Builds the view returned to callers, applying the super-admin
    /// override. The stored record is not changed.
    pub fn view(&self, account: &Account, now: Timestamp) -> AccountView {
        if self.is_super_admin(account.username.as_str()) {
            return AccountView {
                tier: MembershipTier::Vip,
                vip_status: VipStatus::Approved,
                vip_expiry: None,
                is_vip: true,
                is_admin: true,
                days_remaining: None,
                ..AccountView::stored(account, now)
            };
        }
        AccountView::stored(account, now)
    }
}

/// Read model of an account as callers see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub username: String,
    pub tier: MembershipTier,
    pub vip_status: VipStatus,
    pub vip_expiry: Option<Timestamp>,
    pub deposit_name: Option<String>,
    pub vip_requested_at: Option<Timestamp>,
    pub is_vip: bool,
    pub is_admin: bool,
    pub days_remaining: Option<u32>,
    pub created_at: Timestamp,
}

impl AccountView {
    fn stored(account: &Account, now: Timestamp) -> Self {
        Self {
            id: account.id,
            username: account.username.to_string(),
            tier: account.tier,
            vip_status: account.vip_status,
            vip_expiry: account.vip_expiry,
            deposit_name: account.deposit_name.as_ref().map(|d| d.to_string()),
            vip_requested_at: account.vip_requested_at,
            is_vip: account.is_vip_at(now),
            is_admin: false,
            days_remaining: account.days_remaining(now),
            created_at: account.created_at,
        }
    }
}
