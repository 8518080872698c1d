use axum::extract::State;

use crate::crypto::hash_password_input;
use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{ClientIp, Json};
use crate::models::{LogAction, MessageResponse, PasswordResetRequest};
use crate::util::{splice, truthy};

pub async fn reset_password(
    State(state): State<AppState>,
    ip: ClientIp,
    Json(req): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>> {
    if !truthy(req.username.as_ref()) || !truthy(req.new_password.as_ref()) {
        return Err(AppError::BadRequest(
            "Username and new_password required".into(),
        ));
    }

    let hashed = hash_password_input(req.new_password.as_ref())?;
    let username = splice(req.username.as_ref());

    let conn = state.db.get()?;
    if queries::reset_password(&conn, &username, &hashed)? == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    queries::insert_log(
        &conn,
        LogAction::PasswordReset,
        &format!("Password reset for: {} – new hash: {}", username, hashed),
        &ip.0,
    )?;

    Ok(Json(MessageResponse::ok(format!(
        "Password for {} has been reset",
        username
    ))))
}
