pub mod accounts;
pub mod admin;
pub mod exposed;
pub mod shop;

use axum::Router;

use crate::db::AppState;
use crate::error::AppError;

async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Every `/api` route.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        // Registration, login, profiles, uploads
        .merge(accounts::router(state.clone()))
        // Catalogue, discounts, orders, wallet
        .merge(shop::router(state.clone()))
        // Session-only "admin" area
        .merge(admin::router(state))
        // Unauthenticated diagnostics
        .merge(exposed::router())
        .fallback(api_not_found)
}
