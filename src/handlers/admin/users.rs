use axum::extract::State;
use serde::Serialize;

use crate::db::{AppState, JsonRow, queries};
use crate::error::Result;
use crate::extractors::{Json, Path};

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<JsonRow>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_users(&conn)?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>> {
    let conn = state.db.get()?;
    let deleted = queries::delete_user(&conn, &id)?;
    tracing::info!("Deleted {} user(s) matching id {}", deleted, id);
    Ok(Json(DeleteUserResponse { success: true }))
}
