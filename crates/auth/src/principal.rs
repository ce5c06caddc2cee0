use serde::{Deserialize, Serialize};

use tradeloom_core::BuyerId;

use crate::Role;

/// Identity of an authenticated principal (buyer or administrator).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(uuid::Uuid);

tradeloom_core::impl_uuid_newtype!(PrincipalId, "PrincipalId");

/// A fully resolved principal for authorization decisions.
///
/// Built by the transport layer from verified token claims and passed into
/// every core operation; no process-wide principal registry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Buyer principals own carts and orders under the same underlying id.
    pub fn buyer_id(&self) -> BuyerId {
        BuyerId::from_uuid(*self.id.as_uuid())
    }
}
