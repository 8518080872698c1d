mod login;
mod password;
mod profile;
mod register;
mod upload;

pub use login::*;
pub use password::*;
pub use profile::*;
pub use register::*;
pub use upload::*;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::db::AppState;
use crate::middleware::require_session;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/update", put(update_profile))
        .layer(middleware::from_fn_with_state(state, require_session))
        .merge(
            Router::new()
                .route("/register", post(register))
                .route("/login", post(login))
                .route("/user/{id}", get(get_user))
                // No token, no old password
                .route("/password-reset", post(reset_password))
                .route("/upload", post(upload_file)),
        )
}
