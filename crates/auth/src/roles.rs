use serde::{Deserialize, Serialize};

/// Storefront role.
///
/// Buyers browse, fill carts and place orders; administrators manage order
/// status, approvals and stock. There is no finer-grained permission model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Admin,
}
