use axum::{Extension, extract::State};

use crate::db::{AppState, JsonRow, queries};
use crate::error::Result;
use crate::extractors::{Json, Path};
use crate::middleware::SessionContext;
use crate::models::{CreateReview, MessageResponse};
use crate::util::splice;

pub async fn add_review(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CreateReview>,
) -> Result<Json<MessageResponse>> {
    let conn = state.db.get()?;
    queries::insert_review(
        &conn,
        &ctx.user_id_raw(),
        &splice(req.product_id.as_ref()),
        &splice(req.rating.as_ref()),
        &splice(req.comment.as_ref()),
    )?;
    Ok(Json(MessageResponse::ok("Review added")))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Vec<JsonRow>>> {
    let conn = state.db.get()?;
    Ok(Json(queries::list_reviews(&conn, &product_id)?))
}
