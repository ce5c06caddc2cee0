use serde::{Deserialize, Serialize};

use tradeloom_core::{BuyerId, DomainError, DomainResult, Entity};

/// Buyer account profile.
///
/// Carries what invoices and the approval gate need; credentials live with the
/// external authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub id: BuyerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    /// Tax identifier printed on invoices.
    #[serde(default)]
    pub gstin: String,
    /// New accounts start unapproved and cannot place orders.
    #[serde(default)]
    pub approved: bool,
}

impl BuyerProfile {
    /// Order placement is reserved for approved accounts.
    pub fn ensure_approved(&self) -> DomainResult<()> {
        if self.approved {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}

impl Entity for BuyerProfile {
    type Id = BuyerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
