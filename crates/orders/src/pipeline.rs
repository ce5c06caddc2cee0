//! The cart-to-order transactional core.

use std::sync::Arc;

use chrono::Utc;

use tradeloom_cart::CartStore;
use tradeloom_catalog::{InventoryLedger, ProductCatalog};
use tradeloom_core::{BuyerId, DomainError, DomainResult};

use crate::invoice_number::InvoiceNumberGenerator;
use crate::order::{Order, OrderId, OrderItem, ShippingAddress};
use crate::OrderStore;

/// Converts one buyer's mutable cart into an immutable, fully priced order.
///
/// One call is one unit of work: a single cart snapshot is read up front, unit
/// prices are re-resolved from current product data, the order is persisted,
/// stock is conditionally decremented, and the cart is cleared. Any failure
/// after persistence unwinds what was already applied, so a half-created order
/// is never observable.
pub struct OrderPipeline {
    carts: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
    ledger: Arc<dyn InventoryLedger>,
    orders: Arc<dyn OrderStore>,
    invoice_numbers: Arc<dyn InvoiceNumberGenerator>,
}

impl OrderPipeline {
    pub fn new(
        carts: Arc<dyn CartStore>,
        catalog: Arc<dyn ProductCatalog>,
        ledger: Arc<dyn InventoryLedger>,
        orders: Arc<dyn OrderStore>,
        invoice_numbers: Arc<dyn InvoiceNumberGenerator>,
    ) -> Self {
        Self {
            carts,
            catalog,
            ledger,
            orders,
            invoice_numbers,
        }
    }

    /// Create an order from the buyer's current cart.
    ///
    /// Buyer approval is checked by the caller before this runs; everything
    /// here is principal-agnostic.
    pub fn create_order(
        &self,
        buyer_id: BuyerId,
        shipping_address: ShippingAddress,
        notes: String,
    ) -> DomainResult<Order> {
        shipping_address.validate()?;

        // One consistent snapshot; never re-read mid-operation.
        let mut cart = self.carts.load(buyer_id)?;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let mut items = Vec::with_capacity(cart.items().len());
        for line in cart.items() {
            // A line whose product is gone or withdrawn fails the whole
            // operation; dropping it silently would desynchronize the total
            // from what the buyer reviewed.
            let product = match self.catalog.product(line.product_id) {
                Some(p) if p.is_orderable() => p,
                _ => {
                    return Err(DomainError::invalid_cart_state(format!(
                        "product {} can no longer be ordered",
                        line.product_id
                    )));
                }
            };

            items.push(OrderItem {
                product_id: product.id_typed(),
                name: product.name().to_string(),
                image: product.primary_image().to_string(),
                quantity: line.quantity,
                size: line.size.clone(),
                color: line.color.clone(),
                unit_price: product.unit_price_for(line.quantity),
            });
        }

        let order = Order::new(
            OrderId::new(),
            buyer_id,
            items,
            shipping_address,
            self.invoice_numbers.next_invoice_number(),
            notes,
            Utc::now(),
        );

        self.orders.insert(order.clone())?;

        // Stock moves only once the order is recorded; a shortfall on any line
        // unwinds the earlier decrements and the order itself.
        if let Err(err) = self.decrement_stock(&order) {
            self.unwind_order(&order);
            return Err(err);
        }

        cart.clear();
        if let Err(err) = self.carts.save(&cart) {
            self.restore_stock(order.items());
            self.unwind_order(&order);
            return Err(err);
        }

        tracing::info!(
            order_id = %order.id_typed(),
            buyer_id = %buyer_id,
            invoice_number = %order.invoice_number(),
            total_amount = order.total_amount(),
            "order created"
        );

        Ok(order)
    }

    fn decrement_stock(&self, order: &Order) -> DomainResult<()> {
        let items = order.items();
        for (idx, item) in items.iter().enumerate() {
            if let Err(err) = self.ledger.decrement(item.product_id, item.quantity) {
                self.restore_stock(&items[..idx]);
                return Err(err);
            }
        }
        Ok(())
    }

    fn restore_stock(&self, items: &[OrderItem]) {
        for item in items {
            if let Err(err) = self.ledger.restore(item.product_id, item.quantity) {
                tracing::warn!(
                    product_id = %item.product_id,
                    quantity = item.quantity,
                    error = %err,
                    "failed to restore stock while rolling back checkout"
                );
            }
        }
    }

    fn unwind_order(&self, order: &Order) {
        if let Err(err) = self.orders.remove(order.id_typed()) {
            tracing::warn!(
                order_id = %order.id_typed(),
                error = %err,
                "failed to discard order while rolling back checkout"
            );
        }
    }
}
