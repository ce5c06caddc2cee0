use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use tradeloom_auth::require_admin;
use tradeloom_buyers::BuyerDirectory;
use tradeloom_catalog::ProductId;
use tradeloom_core::BuyerId;
use tradeloom_orders::{OrderId, OrderStore};

use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/:id/status", put(update_order_status))
        .route("/admin/buyers/:id/approve", put(approve_buyer))
        .route("/admin/products/:id/stock", put(update_stock))
}

async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Query(query): Query<dto::ListOrdersQuery>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.principal()) {
        return errors::authz_error_to_response(e);
    }
    Json(services.orders.list(query.status)).into_response()
}

async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.principal()) {
        return errors::authz_error_to_response(e);
    }

    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Some(mut order) = services.orders.get(order_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found");
    };

    if let Err(e) = order.transition_status(body.status, services.transition_policy) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.orders.update(&order) {
        return errors::domain_error_to_response(e);
    }

    Json(order).into_response()
}

async fn approve_buyer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ApproveBuyerRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.principal()) {
        return errors::authz_error_to_response(e);
    }

    let buyer_id: BuyerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.buyers.set_approval(buyer_id, body.approved) {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(ctx.principal()) {
        return errors::authz_error_to_response(e);
    }

    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .catalog
        .set_stock(product_id, body.stock, body.is_available)
    {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
