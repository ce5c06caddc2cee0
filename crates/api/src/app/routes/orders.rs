use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use tradeloom_auth::require_owner_or_admin;
use tradeloom_buyers::BuyerDirectory;
use tradeloom_invoicing::render_invoice;
use tradeloom_orders::{Order, OrderId, OrderStore};

use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/my", get(my_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/invoice", get(download_invoice))
}

async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let buyer_id = ctx.principal().buyer_id();

    // Approval gate: checked against the directory before the pipeline
    // mutates anything, so a token issued before an un-approval cannot order.
    let Some(profile) = services.buyers.profile(buyer_id) else {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "buyer account is not recognized",
        );
    };
    if let Err(e) = profile.ensure_approved() {
        return errors::domain_error_to_response(e);
    }

    match services
        .pipeline
        .create_order(buyer_id, body.shipping_address, body.notes)
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn my_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    Json(services.orders.for_buyer(ctx.principal().buyer_id())).into_response()
}

async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order = match load_authorized(&services, &ctx, &id) {
        Ok(order) => order,
        Err(resp) => return resp,
    };
    Json(order).into_response()
}

async fn download_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order = match load_authorized(&services, &ctx, &id) {
        Ok(order) => order,
        Err(resp) => return resp,
    };

    let Some(profile) = services.buyers.profile(order.buyer_id()) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "buyer profile not found");
    };

    let bytes = render_invoice(&order, &profile, &services.branding);

    let disposition = format!(
        "attachment; filename=\"invoice-{}.txt\"",
        order.invoice_number()
    );
    let disposition = match HeaderValue::from_str(&disposition) {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Fetch an order and enforce the owner-or-admin read rule. A 403 carries no
/// order data.
fn load_authorized(
    services: &AppServices,
    ctx: &PrincipalContext,
    id: &str,
) -> Result<Order, axum::response::Response> {
    let order_id: OrderId = id.parse().map_err(errors::domain_error_to_response)?;

    let order = services
        .orders
        .get(order_id)
        .ok_or_else(|| errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"))?;

    require_owner_or_admin(ctx.principal(), order.buyer_id())
        .map_err(errors::authz_error_to_response)?;

    Ok(order)
}
