#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::*;
use futures::future::join_all;
use serde_json::json;

#[tokio::test]
async fn test_parallel_discount_requests_stack() {
    let t = setup();
    let token = t.token_for("alice");
    let product_id = t.product_id("Mechanical Keyboard");
    let body = json!({"code": "IDN20", "product_id": product_id});

    let responses = join_all(
        (0..3).map(|_| t.send(post("/api/discount/apply", Some(&token), &body))),
    )
    .await;

    for (status, _, body) in &responses {
        assert_eq!(*status, StatusCode::OK, "{}", body);
        assert_eq!(body["success"], true);
    }

    let (_, _, check) = t
        .send(get(&format!("/api/discount/check/{}", product_id), Some(&token)))
        .await;
    assert_eq!(check["applied"], true);
    assert_eq!(check["times_applied"], 3);
    assert_eq!(check["discount_percent"].as_f64(), Some(60.0));
}

#[tokio::test]
async fn test_stacked_discount_is_capped_at_100_percent() {
    let t = setup();
    let token = t.token_for("bob");
    let product_id = t.product_id("Lock Pick Set");
    let body = json!({"code": "IDN20", "product_id": product_id});

    join_all((0..6).map(|_| t.send(post("/api/discount/apply", Some(&token), &body)))).await;

    let (_, _, check) = t
        .send(get(&format!("/api/discount/check/{}", product_id), Some(&token)))
        .await;
    assert_eq!(check["times_applied"], 6);
    assert_eq!(check["discount_percent"].as_f64(), Some(100.0));
}

#[tokio::test]
async fn test_parallel_withdrawals_overdraw_wallet() {
    let t = setup();
    let token = t.token_for("bob");
    let body = json!({"amount": 800});

    let responses = join_all(
        (0..2).map(|_| t.send(post("/api/wallet/withdraw", Some(&token), &body))),
    )
    .await;

    for (status, _, body) in &responses {
        assert_eq!(*status, StatusCode::OK, "{}", body);
        assert_eq!(body["previous"].as_f64(), Some(1000.0));
    }
    assert_eq!(t.balance("bob"), -600.0);
}
