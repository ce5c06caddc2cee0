//! In-memory, thread-safe implementations of the storefront's persistence
//! ports, for dev and test deployments.
//!
//! Each mutation takes the write lock for the whole check-plus-mutate, which
//! is what gives single-record updates (notably the conditional stock
//! decrement) their atomicity.

use std::collections::HashMap;
use std::sync::RwLock;

use tradeloom_buyers::{BuyerDirectory, BuyerProfile};
use tradeloom_cart::{Cart, CartStore};
use tradeloom_catalog::{InventoryLedger, Product, ProductCatalog, ProductId};
use tradeloom_core::{BuyerId, DomainError, DomainResult};
use tradeloom_orders::{Order, OrderId, OrderStatus, OrderStore};

fn poisoned(what: &str) -> DomainError {
    DomainError::internal(format!("{what} store lock poisoned"))
}

/// Product records plus the stock ledger over them.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed/wiring hook. Catalog CRUD proper is an external collaborator.
    pub fn upsert(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id_typed(), product);
        }
    }

    /// Stock/availability administration (the admin surface's mutator).
    pub fn set_stock(
        &self,
        id: ProductId,
        stock: i64,
        available: Option<bool>,
    ) -> DomainResult<Product> {
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        let mut products = self.products.write().map_err(|_| poisoned("catalog"))?;
        let product = products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.set_stock(stock);
        if let Some(available) = available {
            product.set_available(available);
        }
        Ok(product.clone())
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> Option<Product> {
        let products = self.products.read().ok()?;
        products.get(&id).cloned()
    }

    fn list_available(&self) -> Vec<Product> {
        let products = match self.products.read() {
            Ok(p) => p,
            Err(_) => return Vec::new(),
        };
        let mut listed: Vec<Product> = products
            .values()
            .filter(|p| p.is_orderable())
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()));
        listed
    }
}

impl InventoryLedger for InMemoryCatalog {
    fn decrement(&self, id: ProductId, quantity: u32) -> DomainResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned("catalog"))?;
        let product = products.get_mut(&id).ok_or(DomainError::NotFound)?;
        let needed = i64::from(quantity);
        if product.stock() < needed {
            return Err(DomainError::insufficient_stock(format!(
                "product {} has {} pieces left, {} requested",
                id,
                product.stock(),
                quantity
            )));
        }
        product.adjust_stock(-needed);
        Ok(())
    }

    fn restore(&self, id: ProductId, quantity: u32) -> DomainResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned("catalog"))?;
        let product = products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.adjust_stock(i64::from(quantity));
        Ok(())
    }
}

/// One cart per buyer, created lazily on first load.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<BuyerId, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for InMemoryCartStore {
    fn load(&self, buyer_id: BuyerId) -> DomainResult<Cart> {
        let mut carts = self.carts.write().map_err(|_| poisoned("cart"))?;
        Ok(carts
            .entry(buyer_id)
            .or_insert_with(|| Cart::empty(buyer_id))
            .clone())
    }

    fn save(&self, cart: &Cart) -> DomainResult<()> {
        let mut carts = self.carts.write().map_err(|_| poisoned("cart"))?;
        carts.insert(cart.buyer_id(), cart.clone());
        Ok(())
    }
}

/// Append-mostly order records, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> DomainResult<()> {
        let mut orders = self.orders.write().map_err(|_| poisoned("order"))?;
        if orders.iter().any(|o| o.id_typed() == order.id_typed()) {
            return Err(DomainError::conflict("order id already exists"));
        }
        if orders
            .iter()
            .any(|o| o.invoice_number() == order.invoice_number())
        {
            return Err(DomainError::conflict(format!(
                "invoice number {} already issued",
                order.invoice_number()
            )));
        }
        orders.push(order);
        Ok(())
    }

    fn remove(&self, id: OrderId) -> DomainResult<()> {
        let mut orders = self.orders.write().map_err(|_| poisoned("order"))?;
        let before = orders.len();
        orders.retain(|o| o.id_typed() != id);
        if orders.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn get(&self, id: OrderId) -> Option<Order> {
        let orders = self.orders.read().ok()?;
        orders.iter().find(|o| o.id_typed() == id).cloned()
    }

    fn for_buyer(&self, buyer_id: BuyerId) -> Vec<Order> {
        let orders = match self.orders.read() {
            Ok(o) => o,
            Err(_) => return Vec::new(),
        };
        orders
            .iter()
            .rev()
            .filter(|o| o.buyer_id() == buyer_id)
            .cloned()
            .collect()
    }

    fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        let orders = match self.orders.read() {
            Ok(o) => o,
            Err(_) => return Vec::new(),
        };
        orders
            .iter()
            .rev()
            .filter(|o| status.map_or(true, |s| o.status() == s))
            .cloned()
            .collect()
    }

    fn update(&self, order: &Order) -> DomainResult<()> {
        let mut orders = self.orders.write().map_err(|_| poisoned("order"))?;
        let stored = orders
            .iter_mut()
            .find(|o| o.id_typed() == order.id_typed())
            .ok_or(DomainError::NotFound)?;
        *stored = order.clone();
        Ok(())
    }
}

/// Buyer profiles keyed by account id.
#[derive(Debug, Default)]
pub struct InMemoryBuyerDirectory {
    buyers: RwLock<HashMap<BuyerId, BuyerProfile>>,
}

impl InMemoryBuyerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, profile: BuyerProfile) {
        if let Ok(mut buyers) = self.buyers.write() {
            buyers.insert(profile.id, profile);
        }
    }
}

impl BuyerDirectory for InMemoryBuyerDirectory {
    fn profile(&self, id: BuyerId) -> Option<BuyerProfile> {
        let buyers = self.buyers.read().ok()?;
        buyers.get(&id).cloned()
    }

    fn set_approval(&self, id: BuyerId, approved: bool) -> DomainResult<BuyerProfile> {
        let mut buyers = self.buyers.write().map_err(|_| poisoned("buyer"))?;
        let profile = buyers.get_mut(&id).ok_or(DomainError::NotFound)?;
        profile.approved = approved;
        Ok(profile.clone())
    }
}
