use axum::{Extension, extract::State};
use serde_json::{Map, Value};

use crate::db::{AppState, JsonRow, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::middleware::SessionContext;
use crate::models::{ProfileUpdated, UPDATABLE_USER_FIELDS};
use crate::util::{splice_value, truthy};

/// Public profile by id. Any caller, any id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonRow>> {
    let conn = state.db.get()?;
    queries::get_user_profile(&conn, &id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Update whichever account the body names (the caller's own by default).
///
/// Every listed column present in the body is written, `role` included.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ProfileUpdated>> {
    let target = match body.get("id") {
        Some(id) if truthy(Some(id)) => splice_value(id),
        _ => ctx.user_id_raw(),
    };

    let fields: Vec<(&str, String)> = UPDATABLE_USER_FIELDS
        .iter()
        .filter_map(|field| body.get(*field).map(|value| (*field, splice_value(value))))
        .collect();

    if fields.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }

    let conn = state.db.get()?;
    queries::update_user_fields(&conn, &target, &fields)?;
    let user = queries::get_updated_user(&conn, &target)?;

    Ok(Json(ProfileUpdated {
        success: true,
        user,
    }))
}
