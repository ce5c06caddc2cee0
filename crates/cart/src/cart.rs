use serde::{Deserialize, Serialize};

use tradeloom_catalog::{Product, ProductId};
use tradeloom_core::{BuyerId, DomainError, DomainResult};

/// Cart line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(uuid::Uuid);

tradeloom_core::impl_uuid_newtype!(CartItemId, "CartItemId");

/// One cart line.
///
/// The product is a weak reference by identity; it may be deleted or withdrawn
/// after the line is created, in which case the line is unresolvable and
/// checkout rejects the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartItem {
    /// Merge identity: two lines are the same when product, size and color all
    /// match. Quantity is not part of the key.
    fn matches_key(&self, product_id: ProductId, size: &Option<String>, color: &Option<String>) -> bool {
        self.product_id == product_id && self.size == *size && self.color == *color
    }
}

/// A buyer's mutable cart.
///
/// Exactly one per buyer, created lazily on first access, cleared (not
/// deleted) after a successful order. Line order is preserved for display;
/// pricing does not depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    buyer_id: BuyerId,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn empty(buyer_id: BuyerId) -> Self {
        Self {
            buyer_id,
            items: Vec::new(),
        }
    }

    pub fn buyer_id(&self) -> BuyerId {
        self.buyer_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add a line, or overwrite the quantity of the line matching
    /// `(product, size, color)` if one already exists.
    ///
    /// The caller resolves the product; an unresolvable (missing or withdrawn)
    /// product never reaches this method's happy path.
    pub fn put_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> DomainResult<CartItemId> {
        if !product.is_orderable() {
            return Err(DomainError::validation("product is not available"));
        }
        product.ensure_min_quantity(quantity)?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.matches_key(product.id_typed(), &size, &color))
        {
            existing.quantity = quantity;
            return Ok(existing.id);
        }

        let item = CartItem {
            id: CartItemId::new(),
            product_id: product.id_typed(),
            quantity,
            size,
            color,
        };
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Change a line's quantity in place.
    ///
    /// `product` must be the line's backing product, resolved by the caller;
    /// the MOQ check uses the product's *current* minimum.
    pub fn update_quantity(
        &mut self,
        item_id: CartItemId,
        quantity: u32,
        product: &Product,
    ) -> DomainResult<()> {
        product.ensure_min_quantity(quantity)?;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(DomainError::NotFound)?;
        item.quantity = quantity;
        Ok(())
    }

    /// Remove a line by identity. Absence is not an error; the operation is
    /// retry-safe.
    pub fn remove_item(&mut self, item_id: CartItemId) {
        self.items.retain(|item| item.id != item_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use tradeloom_catalog::ProductDraft;
    use tradeloom_pricing::PricingTier;

    use super::*;

    fn product() -> Product {
        Product::register(
            ProductId::new(),
            ProductDraft {
                name: "Chikankari Kurta".to_string(),
                description: "Hand-embroidered cotton kurta".to_string(),
                category: "Casual Wear".to_string(),
                images: vec![],
                sizes: vec!["M".to_string(), "L".to_string()],
                colors: vec!["White".to_string()],
                wholesale_price: 850,
                mrp: 1299,
                moq: 10,
                tiers: vec![PricingTier { min_qty: 50, price: 720 }],
                stock: 200,
                is_available: true,
                fabric: "Cotton".to_string(),
                style: "Kurta".to_string(),
                occasion: "Daily".to_string(),
            },
        )
        .unwrap()
    }

    fn buyer() -> BuyerId {
        BuyerId::new()
    }

    #[test]
    fn put_item_appends_a_new_line() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        cart.put_item(&p, 12, Some("M".to_string()), None).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 12);
    }

    #[test]
    fn put_item_with_matching_key_replaces_quantity_instead_of_duplicating() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        let first = cart.put_item(&p, 12, Some("M".to_string()), None).unwrap();
        let second = cart.put_item(&p, 30, Some("M".to_string()), None).unwrap();
        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 30);
    }

    #[test]
    fn differing_size_or_color_creates_a_separate_line() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        cart.put_item(&p, 12, Some("M".to_string()), None).unwrap();
        cart.put_item(&p, 12, Some("L".to_string()), None).unwrap();
        cart.put_item(&p, 12, Some("M".to_string()), Some("White".to_string()))
            .unwrap();
        assert_eq!(cart.items().len(), 3);
    }

    #[test]
    fn put_item_rejects_quantity_below_moq() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        let err = cart.put_item(&p, 9, None, None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn put_item_rejects_withdrawn_products() {
        let mut cart = Cart::empty(buyer());
        let mut p = product();
        p.set_available(false);
        assert!(cart.put_item(&p, 12, None, None).is_err());
    }

    #[test]
    fn update_quantity_enforces_current_moq() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        let id = cart.put_item(&p, 12, None, None).unwrap();
        let err = cart.update_quantity(id, 4, &p).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        cart.update_quantity(id, 60, &p).unwrap();
        assert_eq!(cart.items()[0].quantity, 60);
    }

    #[test]
    fn update_quantity_of_missing_line_is_not_found() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        let err = cart.update_quantity(CartItemId::new(), 12, &p).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn remove_item_is_idempotent() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        let id = cart.put_item(&p, 12, None, None).unwrap();
        cart.remove_item(id);
        assert!(cart.is_empty());
        cart.remove_item(id);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_all_lines() {
        let mut cart = Cart::empty(buyer());
        let p = product();
        cart.put_item(&p, 12, Some("M".to_string()), None).unwrap();
        cart.put_item(&p, 12, Some("L".to_string()), None).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
