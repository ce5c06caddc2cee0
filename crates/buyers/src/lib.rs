//! `tradeloom-buyers` — buyer accounts as the storefront core sees them.
//!
//! Registration, credentials and session issuance are external collaborators;
//! the core consumes a profile (for invoices) and an approval flag (checked
//! before any order is created).

pub mod profile;

use tradeloom_core::{BuyerId, DomainResult};

pub use profile::BuyerProfile;

/// Lookup and approval administration for buyer accounts.
pub trait BuyerDirectory: Send + Sync {
    fn profile(&self, id: BuyerId) -> Option<BuyerProfile>;

    /// Flip the approval flag; returns the updated profile.
    fn set_approval(&self, id: BuyerId, approved: bool) -> DomainResult<BuyerProfile>;
}
