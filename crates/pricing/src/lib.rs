//! `tradeloom-pricing` — wholesale unit-price resolution.
//!
//! Pure functions only. The same resolver backs the buyer-facing price preview
//! and the authoritative order pipeline, so the price a buyer is shown for a
//! given quantity can never differ from the price actually charged for that
//! quantity. Prices are always re-resolved at order-creation time from the
//! then-current cart quantity, never cached from an earlier preview.

use serde::{Deserialize, Serialize};

use tradeloom_core::{DomainError, DomainResult};

/// A bulk-quantity price break: orders of at least `min_qty` units are charged
/// `price` per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_qty: u32,
    /// Price in smallest currency unit.
    pub price: u64,
}

/// Resolve the unit price for `quantity` units.
///
/// Among all tiers whose `min_qty` does not exceed `quantity`, the deepest
/// threshold wins. With no qualifying tier (or no tiers at all) the base
/// wholesale price applies.
///
/// Deterministic and total: tier tables are validated at product-write time
/// (see [`validate_tiers`]), so resolution never has to reject its input.
pub fn resolve_unit_price(base_price: u64, tiers: &[PricingTier], quantity: u32) -> u64 {
    tiers
        .iter()
        .filter(|tier| tier.min_qty <= quantity)
        .max_by_key(|tier| tier.min_qty)
        .map(|tier| tier.price)
        .unwrap_or(base_price)
}

/// Validate a tier table against its base price.
///
/// Runs at product-write time, keeping [`resolve_unit_price`] pure and total:
/// thresholds must be positive and unique, and no tier may charge zero or more
/// than the base wholesale price.
pub fn validate_tiers(base_price: u64, tiers: &[PricingTier]) -> DomainResult<()> {
    for (idx, tier) in tiers.iter().enumerate() {
        if tier.min_qty == 0 {
            return Err(DomainError::validation("tier min_qty must be positive"));
        }
        if tier.price == 0 {
            return Err(DomainError::validation("tier price must be positive"));
        }
        if tier.price > base_price {
            return Err(DomainError::validation(format!(
                "tier price {} exceeds the base wholesale price {}",
                tier.price, base_price
            )));
        }
        if tiers[..idx].iter().any(|t| t.min_qty == tier.min_qty) {
            return Err(DomainError::validation(format!(
                "duplicate tier threshold {}",
                tier.min_qty
            )));
        }
    }
    Ok(())
}
