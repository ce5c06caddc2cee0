//! `tradeloom-orders` — orders and the cart-to-order pipeline.
//!
//! A cart is mutable until checkout; an order is an immutable snapshot of the
//! moment it was placed. This crate owns that conversion, the status
//! lifecycle, and invoice number assignment.

pub mod invoice_number;
pub mod order;
pub mod pipeline;
pub mod status;

use tradeloom_core::{BuyerId, DomainResult};

pub use invoice_number::{InvoiceNumberGenerator, SequencedInvoiceNumbers};
pub use order::{Order, OrderId, OrderItem, ShippingAddress};
pub use pipeline::OrderPipeline;
pub use status::{ensure_transition, OrderStatus, TransitionPolicy};

/// Durable order records.
pub trait OrderStore: Send + Sync {
    /// Persist a newly created order. Fails with `Conflict` when the order id
    /// or invoice number is already taken.
    fn insert(&self, order: Order) -> DomainResult<()>;

    /// Compensation hook for the pipeline: discard an order whose stock
    /// decrement or cart clear failed. Committed orders are never deleted
    /// through any user-facing surface; cancellation is a status.
    fn remove(&self, id: OrderId) -> DomainResult<()>;

    fn get(&self, id: OrderId) -> Option<Order>;

    /// A buyer's own orders, newest first.
    fn for_buyer(&self, buyer_id: BuyerId) -> Vec<Order>;

    /// All orders, newest first, optionally filtered by status.
    fn list(&self, status: Option<OrderStatus>) -> Vec<Order>;

    /// Replace a stored order after a status transition.
    fn update(&self, order: &Order) -> DomainResult<()>;
}
