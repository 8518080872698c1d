use axum::{Extension, extract::State};
use serde::Serialize;

use crate::db::AppState;
use crate::extractors::Json;
use crate::jwt::SessionUser;
use crate::middleware::SessionContext;

#[derive(Debug, Serialize)]
pub struct InternalConfig {
    pub database_path: String,
    pub jwt_secret: String,
}

#[derive(Debug, Serialize)]
pub struct SecretResponse {
    pub message: &'static str,
    pub admin_note: &'static str,
    pub user: SessionUser,
    pub method: &'static str,
    pub internal_config: InternalConfig,
}

pub async fn admin_secret(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<SecretResponse> {
    Json(SecretResponse {
        message: "Welcome to the secret admin area.",
        admin_note: "This endpoint should not be publicly accessible.",
        method: ctx.auth_method.describe(),
        user: ctx.user,
        internal_config: InternalConfig {
            database_path: state.config.database_path.clone(),
            jwt_secret: state.config.jwt_secret.clone(),
        },
    })
}
