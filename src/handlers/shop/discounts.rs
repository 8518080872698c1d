//! Discount codes.
//!
//! `apply` checks for an earlier use, waits, then records the use. The
//! check and the insert are separate statements with no lock between them,
//! so concurrent requests that all pass the check all get recorded.

use axum::{Extension, extract::State};
use serde_json::Value;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{ClientIp, Json, Path};
use crate::middleware::SessionContext;
use crate::models::{
    ApplyDiscount, DiscountApplied, DiscountStatus, LogAction, MessageResponse, ResetDiscount,
    discount_percent,
};
use crate::util::{parse_float, splice};

pub async fn check_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Path(product_id): Path<String>,
) -> Result<Json<DiscountStatus>> {
    let conn = state.db.get()?;
    let usages = queries::list_discount_usages(&conn, &ctx.user_id_raw(), &product_id)?;

    let Some(first) = usages.first() else {
        return Ok(Json(DiscountStatus::NotApplied { applied: false }));
    };

    let total: f64 = usages
        .iter()
        .map(|usage| parse_float(usage.get("discount_percent")))
        .sum();

    Ok(Json(DiscountStatus::Applied {
        applied: true,
        code: first.get("discount_code").cloned().unwrap_or(Value::Null),
        discount_percent: total.min(100.0),
        times_applied: usages.len(),
    }))
}

pub async fn apply_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    ip: ClientIp,
    Json(req): Json<ApplyDiscount>,
) -> Result<Json<DiscountApplied>> {
    let code = splice(req.code.as_ref());
    let percent = discount_percent(&code)
        .ok_or_else(|| AppError::BadRequest("Invalid discount code".into()))?;

    let user_id = ctx.user_id_raw();
    let product_id = splice(req.product_id.as_ref());

    {
        let conn = state.db.get()?;
        let existing = queries::find_discount_usages(&conn, &user_id, &code, &product_id)?;
        if !existing.is_empty() {
            return Err(AppError::BadRequest(
                "Discount code already applied to this product".into(),
            ));
        }
    }

    // Connection is back in the pool while we wait
    tokio::time::sleep(state.config.discount_race_window).await;

    let conn = state.db.get()?;
    queries::insert_discount_usage(&conn, &user_id, &code, &product_id, percent)?;
    let times_applied = queries::count_discount_usages(&conn, &user_id, &code, &product_id)?;

    queries::insert_log(
        &conn,
        LogAction::DiscountApplied,
        &format!(
            "User {} applied {} ({}%) on product {} – total applied: {}x",
            user_id, code, percent, product_id, times_applied
        ),
        &ip.0,
    )?;

    if times_applied > 1 {
        tracing::warn!(
            "Discount {} stacked {}x for user {} on product {}",
            code,
            times_applied,
            user_id,
            product_id
        );
    }

    Ok(Json(DiscountApplied {
        success: true,
        message: format!("Discount {} applied! {}% off", code, percent),
        code,
        discount_percent: percent,
        times_applied,
    }))
}

pub async fn reset_discount(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<ResetDiscount>,
) -> Result<Json<MessageResponse>> {
    let conn = state.db.get()?;
    queries::delete_discount_usages(&conn, &ctx.user_id_raw(), &splice(req.product_id.as_ref()))?;
    Ok(Json(MessageResponse::ok("Discount usage reset")))
}
