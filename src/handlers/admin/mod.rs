//! Administration. The session guard is the only check: any signed-in
//! account can use these.

mod export;
mod ping;
mod secret;
mod users;

pub use export::*;
pub use ping::*;
pub use secret::*;
pub use users::*;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::db::AppState;
use crate::middleware::require_session;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", delete(delete_user))
        .route("/admin/secret", get(admin_secret))
        .route("/admin/ping", post(ping_host))
        .route("/export-pdf", post(export_pdf))
        .layer(middleware::from_fn_with_state(state, require_session))
}
