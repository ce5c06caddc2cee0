//! Pure policy checks at the request boundary.
//!
//! No IO, no panics, no business logic. The buyer approval gate is not here:
//! approval is a property of the buyer profile, checked against the directory
//! by the order surface before the pipeline runs.

use thiserror::Error;

use tradeloom_core::BuyerId;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("administrator role required")]
    AdminRequired,

    #[error("not authorized")]
    Forbidden,
}

/// Administrator-only surfaces (status writes, approvals, stock).
pub fn require_admin(principal: &Principal) -> Result<(), AuthzError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::AdminRequired)
    }
}

/// Record-level read access: the owning buyer or any administrator.
pub fn require_owner_or_admin(principal: &Principal, owner: BuyerId) -> Result<(), AuthzError> {
    if principal.is_admin() || principal.buyer_id() == owner {
        Ok(())
    } else {
        Err(AuthzError::Forbidden)
    }
}
