//! `tradeloom-catalog` — products as the core sees them.
//!
//! The storefront core reads products (pricing inputs, MOQ, availability) and
//! debits stock through [`InventoryLedger`]; everything else about catalog
//! management is an external collaborator.

pub mod ledger;
pub mod product;

pub use ledger::{InventoryLedger, ProductCatalog};
pub use product::{Product, ProductDraft, ProductId};
