//! End-to-end checkout behavior over the in-memory stores.

use std::sync::Arc;

use tradeloom_cart::CartStore;
use tradeloom_catalog::{Product, ProductCatalog, ProductDraft, ProductId};
use tradeloom_core::{BuyerId, DomainError};
use tradeloom_orders::{OrderPipeline, OrderStore, SequencedInvoiceNumbers, ShippingAddress};
use tradeloom_pricing::PricingTier;

use crate::{InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore};

struct Fixture {
    catalog: Arc<InMemoryCatalog>,
    carts: Arc<InMemoryCartStore>,
    orders: Arc<InMemoryOrderStore>,
    pipeline: Arc<OrderPipeline>,
}

impl Fixture {
    fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let carts = Arc::new(InMemoryCartStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let pipeline = Arc::new(OrderPipeline::new(
            carts.clone(),
            catalog.clone(),
            catalog.clone(),
            orders.clone(),
            Arc::new(SequencedInvoiceNumbers::new("TST")),
        ));
        Self {
            catalog,
            carts,
            orders,
            pipeline,
        }
    }

    fn seed_product(&self, name: &str, stock: i64) -> Product {
        let product = Product::register(
            ProductId::new(),
            ProductDraft {
                name: name.to_string(),
                description: "Wholesale lot".to_string(),
                category: "Ethnic Wear".to_string(),
                images: vec![format!("{name}.jpg")],
                sizes: vec![],
                colors: vec![],
                wholesale_price: 850,
                mrp: 1499,
                moq: 10,
                tiers: vec![
                    PricingTier { min_qty: 25, price: 780 },
                    PricingTier { min_qty: 50, price: 720 },
                    PricingTier { min_qty: 100, price: 650 },
                ],
                stock,
                is_available: true,
                fabric: String::new(),
                style: String::new(),
                occasion: String::new(),
            },
        )
        .unwrap();
        self.catalog.upsert(product.clone());
        product
    }

    fn fill_cart(&self, buyer: BuyerId, lines: &[(&Product, u32)]) {
        let mut cart = self.carts.load(buyer).unwrap();
        for (product, quantity) in lines {
            cart.put_item(product, *quantity, None, None).unwrap();
        }
        self.carts.save(&cart).unwrap();
    }
}

fn address() -> ShippingAddress {
    ShippingAddress {
        street: "14 Textile Market Road".to_string(),
        city: "Surat".to_string(),
        state: "Gujarat".to_string(),
        pincode: "395002".to_string(),
        country: "India".to_string(),
    }
}

#[test]
fn empty_cart_fails_and_changes_nothing() {
    let fx = Fixture::new();
    let product = fx.seed_product("Saree", 100);
    let buyer = BuyerId::new();

    let err = fx
        .pipeline
        .create_order(buyer, address(), String::new())
        .unwrap_err();
    assert_eq!(err, DomainError::EmptyCart);
    assert!(fx.orders.for_buyer(buyer).is_empty());
    assert_eq!(
        fx.catalog.product(product.id_typed()).unwrap().stock(),
        100
    );
}

#[test]
fn incomplete_address_is_rejected_before_any_mutation() {
    let fx = Fixture::new();
    let product = fx.seed_product("Saree", 100);
    let buyer = BuyerId::new();
    fx.fill_cart(buyer, &[(&product, 10)]);

    let mut bad = address();
    bad.pincode = String::new();
    let err = fx
        .pipeline
        .create_order(buyer, bad, String::new())
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(fx.carts.load(buyer).unwrap().items().len(), 1);
    assert_eq!(
        fx.catalog.product(product.id_typed()).unwrap().stock(),
        100
    );
}

#[test]
fn checkout_prices_decrements_and_clears() {
    let fx = Fixture::new();
    let saree = fx.seed_product("Saree", 500);
    let kurta = fx.seed_product("Kurta", 500);
    let buyer = BuyerId::new();
    fx.fill_cart(buyer, &[(&saree, 10), (&kurta, 60)]);

    let order = fx
        .pipeline
        .create_order(buyer, address(), "first order".to_string())
        .unwrap();

    // 10 below every tier at 850; 60 reaches the min_qty 50 tier at 720.
    assert_eq!(order.total_amount(), 10 * 850 + 60 * 720);
    assert_eq!(order.items().len(), 2);
    assert_eq!(order.notes(), "first order");
    assert!(order.invoice_number().starts_with("TST-"));

    assert!(fx.carts.load(buyer).unwrap().is_empty());
    assert_eq!(fx.catalog.product(saree.id_typed()).unwrap().stock(), 490);
    assert_eq!(fx.catalog.product(kurta.id_typed()).unwrap().stock(), 440);

    let stored = fx.orders.get(order.id_typed()).unwrap();
    assert_eq!(stored, order);
}

#[test]
fn invoice_numbers_are_unique_across_orders() {
    let fx = Fixture::new();
    let product = fx.seed_product("Saree", 500);
    let first_buyer = BuyerId::new();
    let second_buyer = BuyerId::new();
    fx.fill_cart(first_buyer, &[(&product, 10)]);
    fx.fill_cart(second_buyer, &[(&product, 10)]);

    let first = fx
        .pipeline
        .create_order(first_buyer, address(), String::new())
        .unwrap();
    let second = fx
        .pipeline
        .create_order(second_buyer, address(), String::new())
        .unwrap();
    assert_ne!(first.invoice_number(), second.invoice_number());
}

#[test]
fn later_price_changes_do_not_touch_created_orders() {
    let fx = Fixture::new();
    let product = fx.seed_product("Saree", 500);
    let buyer = BuyerId::new();
    fx.fill_cart(buyer, &[(&product, 60)]);

    let order = fx
        .pipeline
        .create_order(buyer, address(), String::new())
        .unwrap();
    assert_eq!(order.items()[0].unit_price, 720);

    // Repricing the product after the fact.
    let repriced = Product::register(
        product.id_typed(),
        ProductDraft {
            name: "Saree".to_string(),
            description: "Wholesale lot".to_string(),
            category: "Ethnic Wear".to_string(),
            images: vec![],
            sizes: vec![],
            colors: vec![],
            wholesale_price: 999,
            mrp: 1999,
            moq: 10,
            tiers: vec![],
            stock: 500,
            is_available: true,
            fabric: String::new(),
            style: String::new(),
            occasion: String::new(),
        },
    )
    .unwrap();
    fx.catalog.upsert(repriced);

    let stored = fx.orders.get(order.id_typed()).unwrap();
    assert_eq!(stored.items()[0].unit_price, 720);
    assert_eq!(stored.total_amount(), 60 * 720);
}

#[test]
fn unresolvable_product_fails_the_whole_checkout() {
    let fx = Fixture::new();
    let saree = fx.seed_product("Saree", 500);
    let kurta = fx.seed_product("Kurta", 500);
    let buyer = BuyerId::new();
    fx.fill_cart(buyer, &[(&saree, 10), (&kurta, 10)]);

    // Withdraw one product between cart fill and checkout.
    fx.catalog
        .set_stock(kurta.id_typed(), 500, Some(false))
        .unwrap();

    let err = fx
        .pipeline
        .create_order(buyer, address(), String::new())
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCartState(_)));

    // Nothing moved: no order, cart intact, stock untouched.
    assert!(fx.orders.for_buyer(buyer).is_empty());
    assert_eq!(fx.carts.load(buyer).unwrap().items().len(), 2);
    assert_eq!(fx.catalog.product(saree.id_typed()).unwrap().stock(), 500);
}

#[test]
fn stock_shortfall_rolls_back_the_entire_order() {
    let fx = Fixture::new();
    let saree = fx.seed_product("Saree", 500);
    let kurta = fx.seed_product("Kurta", 5);
    let buyer = BuyerId::new();
    fx.fill_cart(buyer, &[(&saree, 10), (&kurta, 10)]);

    let err = fx
        .pipeline
        .create_order(buyer, address(), String::new())
        .unwrap_err();
    assert!(matches!(err, DomainError::InsufficientStock(_)));

    // The saree decrement that succeeded first was compensated.
    assert_eq!(fx.catalog.product(saree.id_typed()).unwrap().stock(), 500);
    assert_eq!(fx.catalog.product(kurta.id_typed()).unwrap().stock(), 5);
    assert!(fx.orders.for_buyer(buyer).is_empty());
    assert_eq!(fx.carts.load(buyer).unwrap().items().len(), 2);
}

#[test]
fn concurrent_checkouts_never_drive_stock_negative() {
    let fx = Fixture::new();
    // Stock covers exactly one of the two competing orders.
    let product = fx.seed_product("Saree", 25);
    let buyers: Vec<BuyerId> = (0..2).map(|_| BuyerId::new()).collect();
    for buyer in &buyers {
        fx.fill_cart(*buyer, &[(&product, 25)]);
    }

    let mut handles = Vec::new();
    for buyer in &buyers {
        let pipeline = fx.pipeline.clone();
        let buyer = *buyer;
        handles.push(std::thread::spawn(move || {
            pipeline.create_order(buyer, address(), String::new())
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let short = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::InsufficientStock(_))))
        .count();

    assert_eq!(succeeded, 1);
    assert_eq!(short, 1);
    assert_eq!(fx.catalog.product(product.id_typed()).unwrap().stock(), 0);
    assert_eq!(fx.orders.list(None).len(), 1);
}

#[test]
fn admin_stock_update_rejects_negative_values() {
    let fx = Fixture::new();
    let product = fx.seed_product("Saree", 10);
    let err = fx
        .catalog
        .set_stock(product.id_typed(), -1, None)
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
