//! `tradeloom-store` — persistence port implementations.
//!
//! The domain crates define the ports (`CartStore`, `ProductCatalog`,
//! `InventoryLedger`, `OrderStore`, `BuyerDirectory`); this crate provides the
//! in-memory implementations the API and tests run on.

pub mod in_memory;

pub use in_memory::{
    InMemoryBuyerDirectory, InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore,
};

#[cfg(test)]
mod integration_tests;
