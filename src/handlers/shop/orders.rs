use axum::{Extension, extract::State};

use crate::db::{AppState, JsonRow, queries};
use crate::error::{AppError, Result};
use crate::extractors::{ClientIp, Json};
use crate::middleware::SessionContext;
use crate::models::{CreateOrder, LogAction, OrderCreated};
use crate::util::{parse_float, splice, truthy};

/// Place an order and charge the wallet the total the client computed.
///
/// The balance check parses the total leniently; a total that does not parse
/// compares false and skips the check. The charge clamps at zero, so a
/// negative total credits the wallet.
pub async fn place_order(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    ip: ClientIp,
    Json(req): Json<CreateOrder>,
) -> Result<Json<OrderCreated>> {
    let user_id = ctx.user_id_raw();
    let conn = state.db.get()?;

    let balance = queries::get_balance(&conn, &user_id)?
        .ok_or_else(|| AppError::BadRequest("Wallet not found".into()))?;
    if balance < parse_float(req.total_price.as_ref()) {
        return Err(AppError::Funds {
            message: "Insufficient wallet balance".into(),
            balance,
        });
    }

    let total_raw = splice(req.total_price.as_ref());
    let order_id = queries::insert_order(
        &conn,
        &queries::NewOrder {
            user_id_raw: &user_id,
            product_id_raw: &splice(req.product_id.as_ref()),
            quantity_raw: &splice(req.quantity.as_ref()),
            total_price_raw: &total_raw,
            shipping_address: &splice(req.shipping_address.as_ref()),
        },
    )?;

    queries::charge_wallet(&conn, &user_id, &total_raw)?;

    if truthy(req.discount_code.as_ref()) {
        queries::insert_log(
            &conn,
            LogAction::DiscountUsed,
            &format!(
                "Order #{} used discount {}",
                order_id,
                splice(req.discount_code.as_ref())
            ),
            &ip.0,
        )?;
    }

    queries::insert_log(
        &conn,
        LogAction::OrderCreated,
        &format!("Order #{} by user {} – ${}", order_id, user_id, total_raw),
        &ip.0,
    )?;

    tracing::info!("Order #{} placed by user {} for {}", order_id, user_id, total_raw);

    Ok(Json(OrderCreated {
        success: true,
        order_id,
        charged: req.total_price,
    }))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<Vec<JsonRow>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_orders(&conn, &ctx.user_id_raw())?))
}
