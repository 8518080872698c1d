#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_client_total_is_charged_as_sent() {
    let t = setup();
    let token = t.token_for("alice");
    let product_id = t.product_id("Mechanical Keyboard");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": product_id, "quantity": 10, "total_price": 0.01, "shipping_address": "x"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["charged"], 0.01);
    assert!((t.balance("alice") - 999.99).abs() < 1e-9);
}

#[tokio::test]
async fn test_negative_total_credits_wallet() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, _) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": 1, "quantity": 1, "total_price": -500, "shipping_address": "x"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(t.balance("alice"), 1500.0);
}

#[tokio::test]
async fn test_non_numeric_total_skips_balance_check() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": 1, "quantity": 1, "total_price": "(SELECT 0)", "shipping_address": "x"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(t.balance("alice"), 1000.0);
}
