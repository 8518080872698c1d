mod discounts;
mod orders;
mod products;
mod reviews;
mod wallet;

pub use discounts::*;
pub use orders::*;
pub use products::*;
pub use reviews::*;
pub use wallet::*;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::db::AppState;
use crate::middleware::require_session;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/reviews", post(add_review))
        // Discounts
        .route("/discount/check/{product_id}", get(check_discount))
        .route("/discount/apply", post(apply_discount))
        .route("/discount/reset", delete(reset_discount))
        // Orders and wallet
        .route("/order", post(place_order))
        .route("/orders", get(list_orders))
        .route("/wallet/deposit", post(deposit))
        .route("/wallet/withdraw", post(withdraw))
        .layer(middleware::from_fn_with_state(state, require_session))
        .merge(
            Router::new()
                .route("/products", get(list_products))
                .route("/products/{id}", get(get_product))
                .route("/search", get(search_products))
                .route("/reviews/{product_id}", get(list_reviews))
                .route("/wallet/{user_id}", get(get_wallet)),
        )
}
