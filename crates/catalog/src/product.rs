use serde::{Deserialize, Serialize};

use tradeloom_core::{DomainError, DomainResult, Entity};
use tradeloom_pricing::{resolve_unit_price, validate_tiers, PricingTier};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(uuid::Uuid);

tradeloom_core::impl_uuid_newtype!(ProductId, "ProductId");

/// Input for registering a product in the catalog.
///
/// Catalog administration itself lives outside the core; this is the shape the
/// core validates before a product becomes visible to carts and orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Base wholesale price in smallest currency unit.
    pub wholesale_price: u64,
    /// Reference retail price, display only.
    pub mrp: u64,
    /// Minimum order quantity per cart line.
    pub moq: u32,
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub fabric: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub occasion: String,
}

fn default_available() -> bool {
    true
}

/// A catalog product, read-mostly from the core's perspective.
///
/// Stock is mutated only through the [`crate::InventoryLedger`] port (order
/// commits) and catalog administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    category: String,
    images: Vec<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    wholesale_price: u64,
    mrp: u64,
    moq: u32,
    tiers: Vec<PricingTier>,
    stock: i64,
    is_available: bool,
    fabric: String,
    style: String,
    occasion: String,
}

impl Product {
    /// Validate a draft and register it under `id`.
    ///
    /// Tier-table integrity is enforced here, at write time, so price
    /// resolution stays pure and total.
    pub fn register(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("product name is required"));
        }
        if draft.wholesale_price == 0 {
            return Err(DomainError::validation("wholesale price must be positive"));
        }
        if draft.moq == 0 {
            return Err(DomainError::validation("minimum order quantity must be positive"));
        }
        if draft.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        validate_tiers(draft.wholesale_price, &draft.tiers)?;

        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            images: draft.images,
            sizes: draft.sizes,
            colors: draft.colors,
            wholesale_price: draft.wholesale_price,
            mrp: draft.mrp,
            moq: draft.moq,
            tiers: draft.tiers,
            stock: draft.stock,
            is_available: draft.is_available,
            fabric: draft.fabric,
            style: draft.style,
            occasion: draft.occasion,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn wholesale_price(&self) -> u64 {
        self.wholesale_price
    }

    pub fn mrp(&self) -> u64 {
        self.mrp
    }

    pub fn moq(&self) -> u32 {
        self.moq
    }

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// First catalog image, or empty when none were uploaded.
    pub fn primary_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or("")
    }

    /// Whether carts and orders may reference this product at all.
    pub fn is_orderable(&self) -> bool {
        self.is_available
    }

    /// Resolve the wholesale unit price for `quantity` units.
    pub fn unit_price_for(&self, quantity: u32) -> u64 {
        resolve_unit_price(self.wholesale_price, &self.tiers, quantity)
    }

    /// Reject quantities below the minimum order quantity.
    pub fn ensure_min_quantity(&self, quantity: u32) -> DomainResult<()> {
        if quantity < self.moq {
            return Err(DomainError::validation(format!(
                "minimum order quantity is {} pieces",
                self.moq
            )));
        }
        Ok(())
    }

    /// Stock mutation hook for the inventory ledger and catalog admin.
    pub fn adjust_stock(&mut self, delta: i64) {
        self.stock += delta;
    }

    pub fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
    }

    pub fn set_available(&mut self, available: bool) {
        self.is_available = available;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Banarasi Silk Saree".to_string(),
            description: "Handwoven silk with zari border".to_string(),
            category: "Ethnic Wear".to_string(),
            images: vec!["saree-front.jpg".to_string(), "saree-back.jpg".to_string()],
            sizes: vec!["Free Size".to_string()],
            colors: vec!["Maroon".to_string(), "Teal".to_string()],
            wholesale_price: 850,
            mrp: 1499,
            moq: 10,
            tiers: vec![
                PricingTier { min_qty: 25, price: 780 },
                PricingTier { min_qty: 50, price: 720 },
                PricingTier { min_qty: 100, price: 650 },
            ],
            stock: 500,
            is_available: true,
            fabric: "Silk".to_string(),
            style: "Saree".to_string(),
            occasion: "Wedding".to_string(),
        }
    }

    #[test]
    fn register_accepts_a_well_formed_draft() {
        let product = Product::register(ProductId::new(), draft()).unwrap();
        assert_eq!(product.moq(), 10);
        assert_eq!(product.primary_image(), "saree-front.jpg");
        assert!(product.is_orderable());
    }

    #[test]
    fn register_rejects_zero_wholesale_price() {
        let mut bad = draft();
        bad.wholesale_price = 0;
        assert!(Product::register(ProductId::new(), bad).is_err());
    }

    #[test]
    fn register_rejects_duplicate_tier_thresholds() {
        let mut bad = draft();
        bad.tiers.push(PricingTier { min_qty: 25, price: 700 });
        assert!(Product::register(ProductId::new(), bad).is_err());
    }

    #[test]
    fn unit_price_uses_the_shared_resolver() {
        let product = Product::register(ProductId::new(), draft()).unwrap();
        assert_eq!(product.unit_price_for(10), 850);
        assert_eq!(product.unit_price_for(60), 720);
    }

    #[test]
    fn min_quantity_is_enforced_with_a_buyer_facing_message() {
        let product = Product::register(ProductId::new(), draft()).unwrap();
        let err = product.ensure_min_quantity(5).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "minimum order quantity is 10 pieces");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn primary_image_is_empty_without_uploads() {
        let mut no_images = draft();
        no_images.images.clear();
        let product = Product::register(ProductId::new(), no_images).unwrap();
        assert_eq!(product.primary_image(), "");
    }
}
