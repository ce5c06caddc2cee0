//! Catalog lookup and stock mutation ports.

use tradeloom_core::DomainResult;

use crate::{Product, ProductId};

/// Read-side catalog lookup.
///
/// Cart and order code resolves products through this port; catalog CRUD is an
/// external collaborator and never goes through the core.
pub trait ProductCatalog: Send + Sync {
    fn product(&self, id: ProductId) -> Option<Product>;

    /// Orderable products, for the browse surface.
    fn list_available(&self) -> Vec<Product>;
}

/// The only stock mutator outside catalog administration.
///
/// Implementations must make `decrement` atomic per product: the floor check
/// and the subtraction happen under one lock, so concurrent checkouts of the
/// same product can never drive stock negative.
pub trait InventoryLedger: Send + Sync {
    /// Subtract `quantity` units, failing with `InsufficientStock` when fewer
    /// than `quantity` units remain. On failure nothing is changed.
    fn decrement(&self, id: ProductId, quantity: u32) -> DomainResult<()>;

    /// Compensating action for a failed checkout: put units back.
    fn restore(&self, id: ProductId, quantity: u32) -> DomainResult<()>;
}
