//! `tradeloom-cart` — per-buyer mutable carts.
//!
//! A cart is the staging area the order pipeline consumes: add/merge, update,
//! remove and clear, all scoped to the authenticated buyer. Nothing here
//! prices anything; quantities are validated against the product's MOQ and the
//! rest waits for checkout.

pub mod cart;

use tradeloom_core::{BuyerId, DomainResult};

pub use cart::{Cart, CartItem, CartItemId};

/// Per-buyer cart persistence.
pub trait CartStore: Send + Sync {
    /// The buyer's cart, created empty on first access.
    ///
    /// Returns a snapshot: the pipeline reads it exactly once per checkout and
    /// never re-reads mid-operation.
    fn load(&self, buyer_id: BuyerId) -> DomainResult<Cart>;

    /// Replace the stored cart wholesale.
    fn save(&self, cart: &Cart) -> DomainResult<()>;
}
