use axum::{Extension, extract::State};

use crate::db::{AppState, JsonRow, queries};
use crate::error::{AppError, Result};
use crate::extractors::{ClientIp, Json, Path};
use crate::middleware::SessionContext;
use crate::models::{AmountRequest, DepositResponse, LogAction, WithdrawResponse};
use crate::util::{format_number, parse_float};

fn wallet_not_found() -> AppError {
    AppError::NotFound("Wallet not found".into())
}

/// Parse the requested amount: a finite number above zero.
fn parse_amount(req: &AmountRequest) -> Result<f64> {
    let amount = parse_float(req.amount.as_ref());
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::BadRequest(
            "Invalid amount. Must be a positive number.".into(),
        ));
    }
    Ok(amount)
}

/// Any wallet by owner id. No session needed.
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<JsonRow>> {
    let conn = state.db.get()?;
    queries::get_wallet(&conn, &user_id)?
        .map(Json)
        .ok_or_else(wallet_not_found)
}

pub async fn deposit(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<DepositResponse>> {
    let amount = parse_amount(&req)?;
    let user_id = ctx.user_id_raw();

    let conn = state.db.get()?;
    queries::credit_wallet(&conn, &user_id, amount)?;
    let balance = queries::get_balance(&conn, &user_id)?.ok_or_else(wallet_not_found)?;

    Ok(Json(DepositResponse {
        success: true,
        balance,
    }))
}

/// Withdraw after a balance check. The check and the debit are separate
/// statements with a pause between them.
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    ip: ClientIp,
    Json(req): Json<AmountRequest>,
) -> Result<Json<WithdrawResponse>> {
    let amount = parse_amount(&req)?;
    let user_id = ctx.user_id_raw();

    let previous = {
        let conn = state.db.get()?;
        queries::get_balance(&conn, &user_id)?.ok_or_else(wallet_not_found)?
    };

    if previous < amount {
        return Err(AppError::Funds {
            message: "Insufficient funds".into(),
            balance: previous,
        });
    }

    tokio::time::sleep(state.config.withdraw_race_window).await;

    let conn = state.db.get()?;
    queries::debit_wallet(&conn, &user_id, amount)?;
    let new_balance = queries::get_balance(&conn, &user_id)?.ok_or_else(wallet_not_found)?;

    queries::insert_log(
        &conn,
        LogAction::WalletWithdraw,
        &format!("User {} withdrew ${}", user_id, format_number(amount)),
        &ip.0,
    )?;

    Ok(Json(WithdrawResponse {
        success: true,
        previous,
        withdrawn: amount,
        new_balance,
    }))
}
