use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tradeloom_catalog::ProductId;
use tradeloom_core::{BuyerId, DomainError, DomainResult, Entity};

use crate::status::{ensure_transition, OrderStatus, TransitionPolicy};

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(uuid::Uuid);

tradeloom_core::impl_uuid_newtype!(OrderId, "OrderId");

/// Frozen per-line snapshot of what the buyer was charged.
///
/// `unit_price` is resolved at order time; later changes to the product's
/// pricing never touch it. This is the only historical record of the charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Resolved unit price at order time, in smallest currency unit.
    pub unit_price: u64,
}

impl OrderItem {
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Destination for a shipped order. All fields but `country` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "India".to_string()
}

impl ShippingAddress {
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "shipping address is missing {field}"
                )));
            }
        }
        Ok(())
    }
}

/// An immutable order snapshot.
///
/// Created atomically by the pipeline from a non-empty cart; after creation
/// only `status` ever changes. Orders are never deleted; cancellation is a
/// status, not a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    buyer_id: BuyerId,
    items: Vec<OrderItem>,
    /// Sum of `unit_price × quantity` across items, computed exactly once at
    /// creation and never recomputed.
    total_amount: u64,
    shipping_address: ShippingAddress,
    status: OrderStatus,
    invoice_number: String,
    notes: String,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Assemble the snapshot. Normally only the pipeline calls this; the total
    /// is derived here so no caller can supply an inconsistent one.
    pub fn new(
        id: OrderId,
        buyer_id: BuyerId,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        invoice_number: String,
        notes: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_amount = items.iter().map(OrderItem::line_total).sum();
        Self {
            id,
            buyer_id,
            items,
            total_amount,
            shipping_address,
            status: OrderStatus::Pending,
            invoice_number,
            notes,
            created_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The one post-creation mutation: replace the status, subject to the
    /// configured transition policy.
    pub fn transition_status(
        &mut self,
        next: OrderStatus,
        policy: TransitionPolicy,
    ) -> DomainResult<()> {
        ensure_transition(self.status, next, policy)?;
        self.status = next;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            street: "14 Textile Market Road".to_string(),
            city: "Surat".to_string(),
            state: "Gujarat".to_string(),
            pincode: "395002".to_string(),
            country: default_country(),
        }
    }

    fn item(quantity: u32, unit_price: u64) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(),
            name: "Georgette Saree".to_string(),
            image: String::new(),
            quantity,
            size: None,
            color: None,
            unit_price,
        }
    }

    #[test]
    fn total_is_the_sum_of_line_totals() {
        let order = Order::new(
            OrderId::new(),
            BuyerId::new(),
            vec![item(10, 850), item(60, 720)],
            address(),
            "TLM-1-0".to_string(),
            String::new(),
            Utc::now(),
        );
        assert_eq!(order.total_amount(), 10 * 850 + 60 * 720);
        assert_eq!(order.total_amount(), 51_700);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn address_validation_requires_all_but_country() {
        let mut addr = address();
        addr.country = String::new();
        assert!(addr.validate().is_ok());

        for wipe in 0..4 {
            let mut addr = address();
            match wipe {
                0 => addr.street = String::new(),
                1 => addr.city = "  ".to_string(),
                2 => addr.state = String::new(),
                _ => addr.pincode = String::new(),
            }
            assert!(addr.validate().is_err());
        }
    }

    #[test]
    fn status_transition_respects_the_policy() {
        let mut order = Order::new(
            OrderId::new(),
            BuyerId::new(),
            vec![item(10, 850)],
            address(),
            "TLM-1-1".to_string(),
            String::new(),
            Utc::now(),
        );
        order
            .transition_status(OrderStatus::Approved, TransitionPolicy::ForwardOnly)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Approved);
        assert!(
            order
                .transition_status(OrderStatus::Pending, TransitionPolicy::ForwardOnly)
                .is_err()
        );
        assert_eq!(order.status(), OrderStatus::Approved);
    }
}
