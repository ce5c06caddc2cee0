//! Application wiring: services, router, and the request surface.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json, Router};
use tower::ServiceBuilder;

use tradeloom_invoicing::InvoiceBranding;
use tradeloom_orders::{OrderPipeline, SequencedInvoiceNumbers, TransitionPolicy};
use tradeloom_store::{
    InMemoryBuyerDirectory, InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore,
};

use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared service handles for request handlers.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub carts: Arc<InMemoryCartStore>,
    pub orders: Arc<InMemoryOrderStore>,
    pub buyers: Arc<InMemoryBuyerDirectory>,
    pub pipeline: Arc<OrderPipeline>,
    pub transition_policy: TransitionPolicy,
    pub branding: InvoiceBranding,
}

impl AppServices {
    /// Wire the full stack over the in-memory stores.
    ///
    /// The catalog doubles as the inventory ledger: both ports are backed by
    /// the same product records, so checkout's conditional decrement sees the
    /// exact stock the browse surface shows.
    pub fn in_memory(invoice_prefix: impl Into<String>) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let carts = Arc::new(InMemoryCartStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let buyers = Arc::new(InMemoryBuyerDirectory::new());
        let pipeline = Arc::new(OrderPipeline::new(
            carts.clone(),
            catalog.clone(),
            catalog.clone(),
            orders.clone(),
            Arc::new(SequencedInvoiceNumbers::new(invoice_prefix)),
        ));

        Self {
            catalog,
            carts,
            orders,
            buyers,
            pipeline,
            transition_policy: TransitionPolicy::ForwardOnly,
            branding: InvoiceBranding::default(),
        }
    }
}

/// Build the HTTP application.
///
/// Everything except `/healthz` sits behind bearer authentication; wholesale
/// pricing is not shown to anonymous visitors.
pub fn build_app(services: AppServices, jwt_secret: String) -> Router {
    let auth_state = AuthState::new(&jwt_secret);

    let protected = Router::new()
        .merge(routes::catalog::router())
        .merge(routes::cart::router())
        .merge(routes::orders::router())
        .merge(routes::admin::router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(Arc::new(services)))
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    crate::middleware::auth_middleware,
                )),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .merge(protected)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
