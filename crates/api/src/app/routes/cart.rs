use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use tradeloom_cart::{CartItemId, CartStore};
use tradeloom_catalog::{ProductCatalog, ProductId};
use tradeloom_core::DomainError;

use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_item).put(update_item))
        .route("/cart/clear", delete(clear_cart))
        .route("/cart/:item_id", delete(remove_item))
}

async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    let cart = match services.carts.load(ctx.principal().buyer_id()) {
        Ok(cart) => cart,
        Err(e) => return errors::domain_error_to_response(e),
    };
    Json(dto::CartView::resolve(&cart, services.catalog.as_ref())).into_response()
}

async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::AddCartItemRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // An unresolvable product is a validation failure, same as a MOQ breach.
    let Some(product) = services.catalog.product(product_id) else {
        return errors::domain_error_to_response(DomainError::validation(
            "product cannot be resolved",
        ));
    };

    let mut cart = match services.carts.load(ctx.principal().buyer_id()) {
        Ok(cart) => cart,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = cart.put_item(&product, body.quantity, body.size, body.color) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.carts.save(&cart) {
        return errors::domain_error_to_response(e);
    }

    Json(dto::CartView::resolve(&cart, services.catalog.as_ref())).into_response()
}

async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::UpdateCartItemRequest>,
) -> axum::response::Response {
    let item_id: CartItemId = match body.item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut cart = match services.carts.load(ctx.principal().buyer_id()) {
        Ok(cart) => cart,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let product_id = match cart.item(item_id) {
        Some(line) => line.product_id,
        None => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found in cart");
        }
    };
    let Some(product) = services.catalog.product(product_id) else {
        return errors::domain_error_to_response(DomainError::validation(
            "product cannot be resolved",
        ));
    };

    if let Err(e) = cart.update_quantity(item_id, body.quantity, &product) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.carts.save(&cart) {
        return errors::domain_error_to_response(e);
    }

    Json(dto::CartView::resolve(&cart, services.catalog.as_ref())).into_response()
}

async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    let item_id: CartItemId = match item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut cart = match services.carts.load(ctx.principal().buyer_id()) {
        Ok(cart) => cart,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Idempotent: a missing line leaves the cart unchanged.
    cart.remove_item(item_id);
    if let Err(e) = services.carts.save(&cart) {
        return errors::domain_error_to_response(e);
    }

    Json(dto::CartView::resolve(&cart, services.catalog.as_ref())).into_response()
}

async fn clear_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    let mut cart = match services.carts.load(ctx.principal().buyer_id()) {
        Ok(cart) => cart,
        Err(e) => return errors::domain_error_to_response(e),
    };

    cart.clear();
    if let Err(e) = services.carts.save(&cart) {
        return errors::domain_error_to_response(e);
    }

    Json(serde_json::json!({ "message": "cart cleared" })).into_response()
}
