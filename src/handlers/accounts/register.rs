use axum::extract::State;

use crate::crypto::hash_password_input;
use crate::db::{AppState, queries};
use crate::error::Result;
use crate::extractors::{ClientIp, Json};
use crate::models::{LogAction, MessageResponse, RegisterRequest, STARTING_BALANCE};
use crate::util::splice;

pub async fn register(
    State(state): State<AppState>,
    ip: ClientIp,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    let hashed = hash_password_input(req.password.as_ref())?;
    let username = splice(req.username.as_ref());
    let email = splice(req.email.as_ref());

    let conn = state.db.get()?;
    queries::insert_user(&conn, &username, &email, &hashed)?;

    if let Some(user_id) = queries::find_user_id_by_username(&conn, &username)? {
        queries::create_wallet(&conn, user_id, STARTING_BALANCE)?;
    }

    queries::insert_log(
        &conn,
        LogAction::UserRegister,
        &format!("New user registered: {}", username),
        &ip.0,
    )?;

    tracing::info!("Registered user {}", username);
    Ok(Json(MessageResponse::ok("Registration successful")))
}
