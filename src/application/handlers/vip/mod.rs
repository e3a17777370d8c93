//! VIP workflow handlers.
//!
//! ## Commands
//! - Requesting VIP with a deposit name (account holder)
//! - Approving or rejecting a pending request (super-admin)
//!
//! ## Queries
//! - Listing pending requests for reconciliation (super-admin)

mod approve_vip;
mod list_pending;
mod reject_vip;
mod request_vip;

pub use approve_vip::{ApproveVipCommand, ApproveVipHandler};
pub use list_pending::{ListPendingRequestsHandler, ListPendingRequestsQuery};
pub use reject_vip::{RejectVipCommand, RejectVipHandler};
pub use request_vip::{RequestVipCommand, RequestVipHandler};

use tracing::warn;

use crate::domain::account::{AccountError, AdminPolicy};
use crate::domain::foundation::AuthenticatedUser;

fn require_super_admin(policy: &AdminPolicy, actor: &AuthenticatedUser) -> Result<(), AccountError> {
    if policy.is_super_admin(&actor.username) {
        return Ok(());
    }
    warn!(
        account_id = %actor.account_id,
        username = %actor.username,
        "Non-admin attempted a VIP review operation"
    );
    Err(AccountError::Forbidden)
}
