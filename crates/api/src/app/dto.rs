use serde::{Deserialize, Serialize};

use tradeloom_cart::{Cart, CartItemId};
use tradeloom_catalog::{Product, ProductCatalog, ProductId};
use tradeloom_core::BuyerId;
use tradeloom_orders::{OrderStatus, ShippingAddress};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApproveBuyerRequest {
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: i64,
    #[serde(default)]
    pub is_available: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PricePreviewQuery {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

// -------------------------
// Response views
// -------------------------

/// Cart line with its product resolved for display.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub id: CartItemId,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    /// `None` when the product was deleted after the line was added; checkout
    /// rejects such lines instead of dropping them.
    pub product: Option<Product>,
    /// Unit price the current quantity would resolve to right now. Display
    /// only; the authoritative price is re-resolved at checkout.
    pub unit_price: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub buyer_id: BuyerId,
    pub items: Vec<CartItemView>,
}

impl CartView {
    pub fn resolve(cart: &Cart, catalog: &dyn ProductCatalog) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|line| {
                let product = catalog.product(line.product_id);
                CartItemView {
                    id: line.id,
                    quantity: line.quantity,
                    size: line.size.clone(),
                    color: line.color.clone(),
                    unit_price: product.as_ref().map(|p| p.unit_price_for(line.quantity)),
                    product,
                }
            })
            .collect();

        Self {
            buyer_id: cart.buyer_id(),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PricePreview {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}
