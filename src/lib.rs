//! IVM - a deliberately vulnerable marketplace for web security training.
//!
//! The HTTP API, its SQLite storage and the static client server live here;
//! `main.rs` only wires configuration and starts the listener.

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod expr;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod util;

use axum::Router;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::db::AppState;

/// Any origin, with credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the full application: `/api`, `/uploads` and the client.
pub fn app(state: AppState) -> Router {
    let client = ServeDir::new(&state.config.web_dir)
        .fallback(ServeFile::new(state.config.web_dir.join("index.html")));

    Router::new()
        .nest("/api", handlers::router(state.clone()))
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .fallback_service(client)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::access_log,
        ))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
