#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_discount_apply_check_and_reset() {
    let t = setup();
    let token = t.token_for("alice");
    let product_id = t.product_id("Kopi Luwak 250g");

    let (_, _, body) = t
        .send(get(&format!("/api/discount/check/{}", product_id), Some(&token)))
        .await;
    assert_eq!(body, json!({"applied": false}));

    let (status, _, body) = t
        .send(post(
            "/api/discount/apply",
            Some(&token),
            &json!({"code": "IDN20", "product_id": product_id}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount_percent"], 20);
    assert_eq!(body["times_applied"], 1);
    assert_eq!(body["message"], "Discount IDN20 applied! 20% off");

    let (status, _, body) = t
        .send(post(
            "/api/discount/apply",
            Some(&token),
            &json!({"code": "IDN20", "product_id": product_id}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Discount code already applied to this product");

    let (_, _, body) = t
        .send(get(&format!("/api/discount/check/{}", product_id), Some(&token)))
        .await;
    assert_eq!(body["applied"], true);
    assert_eq!(body["code"], "IDN20");
    assert_eq!(body["discount_percent"].as_f64(), Some(20.0));
    assert_eq!(body["times_applied"], 1);

    let (status, _, body) = t
        .send(json_request(
            "DELETE",
            "/api/discount/reset",
            Some(&token),
            &json!({"product_id": product_id}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Discount usage reset");

    let (_, _, body) = t
        .send(get(&format!("/api/discount/check/{}", product_id), Some(&token)))
        .await;
    assert_eq!(body["applied"], false);
}

#[tokio::test]
async fn test_unknown_discount_code() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, body) = t
        .send(post(
            "/api/discount/apply",
            Some(&token),
            &json!({"code": "FREE100", "product_id": 1}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid discount code");
}

#[tokio::test]
async fn test_place_order_charges_wallet() {
    let t = setup();
    let token = t.token_for("alice");
    let product_id = t.product_id("Batik Shirt");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({
                "product_id": product_id,
                "quantity": 2,
                "total_price": 48,
                "shipping_address": "12 Jalan Merdeka",
                "discount_code": "IDN20"
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["charged"], 48);
    assert!(body["orderId"].as_i64().unwrap() > 0);
    assert_eq!(t.balance("alice"), 952.0);

    let actions = t.log_actions();
    assert!(actions.contains(&"discount_used".to_string()));
    assert!(actions.contains(&"order_created".to_string()));

    let (status, _, orders) = t.send(get("/api/orders", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["product_name"], "Batik Shirt");
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(orders[0]["quantity"], 2);
}

#[tokio::test]
async fn test_order_over_balance_is_refused() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": 1, "quantity": 1, "total_price": 5000, "shipping_address": "x"}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient wallet balance");
    assert_eq!(body["balance"].as_f64(), Some(1000.0));
}

#[tokio::test]
async fn test_orders_are_per_user() {
    let t = setup();
    let alice = t.token_for("alice");
    let bob = t.token_for("bob");

    t.send(post(
        "/api/order",
        Some(&alice),
        &json!({"product_id": 1, "quantity": 1, "total_price": 10, "shipping_address": "a"}),
    ))
    .await;

    let (_, _, orders) = t.send(get("/api/orders", Some(&bob))).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_get_wallet() {
    let t = setup();
    let id = t.user_id("bob");

    let (status, _, body) = t.send(get(&format!("/api/wallet/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], id);
    assert_eq!(body["balance"].as_f64(), Some(1000.0));

    let (status, _, body) = t.send(get("/api/wallet/9999", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Wallet not found");
}

#[tokio::test]
async fn test_deposit() {
    let t = setup();
    let token = t.token_for("bob");

    let (status, _, body) = t
        .send(post("/api/wallet/deposit", Some(&token), &json!({"amount": "250.5"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"].as_f64(), Some(1250.5));
    assert_eq!(t.balance("bob"), 1250.5);
}

#[tokio::test]
async fn test_invalid_amounts_are_rejected() {
    let t = setup();
    let token = t.token_for("bob");

    for amount in [json!(-5), json!(0), json!("abc"), json!(null)] {
        for route in ["/api/wallet/deposit", "/api/wallet/withdraw"] {
            let (status, _, body) = t
                .send(post(route, Some(&token), &json!({"amount": amount})))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", route, amount);
            assert_eq!(body["error"], "Invalid amount. Must be a positive number.");
        }
    }
    assert_eq!(t.balance("bob"), 1000.0);
}

#[tokio::test]
async fn test_withdraw() {
    let t = setup();
    let token = t.token_for("bob");

    let (status, _, body) = t
        .send(post("/api/wallet/withdraw", Some(&token), &json!({"amount": 300})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"].as_f64(), Some(1000.0));
    assert_eq!(body["withdrawn"].as_f64(), Some(300.0));
    assert_eq!(body["new_balance"].as_f64(), Some(700.0));
    assert!(t.log_actions().contains(&"wallet_withdraw".to_string()));

    let (status, _, body) = t
        .send(post("/api/wallet/withdraw", Some(&token), &json!({"amount": 701})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient funds");
    assert_eq!(body["balance"].as_f64(), Some(700.0));
}

#[tokio::test]
async fn test_order_for_missing_product_is_accepted() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": 999, "quantity": 1, "total_price": 5, "shipping_address": "x"}),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(t.balance("alice"), 995.0);

    let conn = t.state.db.get().unwrap();
    let enforced: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enforced, 0);
}

#[tokio::test]
async fn test_null_total_nulls_the_balance() {
    let t = setup();
    let token = t.token_for("alice");
    let id = t.user_id("alice");

    let (status, _, body) = t
        .send(post(
            "/api/order",
            Some(&token),
            &json!({"product_id": 1, "quantity": 1, "total_price": null, "shipping_address": "x"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["charged"].is_null());
    assert!(body.get("charged").is_some());

    let (_, _, wallet) = t.send(get(&format!("/api/wallet/{}", id), None)).await;
    assert!(wallet["balance"].is_null());

    let (_, _, orders) = t.send(get("/api/orders", Some(&token))).await;
    assert!(orders[0]["total_price"].is_null());
}
