//! Routes with no session check that hand out internals.

mod data;
mod diagnostics;
mod eval;
mod redirect;

pub use data::*;
pub use diagnostics::*;
pub use eval::*;
pub use redirect::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::db::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/internal/metadata", get(internal_metadata))
        .route("/config", get(app_config))
        .route("/health", get(health))
        .route("/robots.txt", get(robots))
        .route("/users/export", get(export_users))
        .route("/backup/{table}", get(backup_table))
        .route("/admin/logs", get(read_logs))
        .route("/feedback", post(feedback))
        .route("/debug", post(debug_eval))
        .route("/redirect", get(redirect))
}
