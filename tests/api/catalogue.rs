#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_list_products_includes_seller() {
    let t = setup();

    let (status, _, body) = t.send(get("/api/products", None)).await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 6);
    let keyboard = products
        .iter()
        .find(|p| p["name"] == "Mechanical Keyboard")
        .unwrap();
    assert_eq!(keyboard["seller"], "admin");
    assert_eq!(keyboard["price"], 89.99);
}

#[tokio::test]
async fn test_get_product() {
    let t = setup();
    let id = t.product_id("Batik Shirt");

    let (status, _, body) = t.send(get(&format!("/api/products/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Batik Shirt");
    assert_eq!(body["seller"], "alice");

    let (status, _, body) = t.send(get("/api/products/424242", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_create_product_applies_defaults() {
    let t = setup();
    let token = t.token_for("bob");

    let (status, _, body) = t
        .send(post(
            "/api/products",
            Some(&token),
            &json!({
                "name": "Arduino Kit",
                "description": "Starter kit",
                "price": 45.5,
                "category": "Electronics",
                "stock": 0
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["productId"].as_i64().unwrap();

    let (_, _, product) = t.send(get(&format!("/api/products/{}", id), None)).await;
    assert_eq!(product["seller"], "bob");
    assert_eq!(product["stock"], 10);
    assert_eq!(product["image"], "/uploads/default-product.png");
    assert_eq!(product["price"], 45.5);
}

#[tokio::test]
async fn test_create_product_requires_session() {
    let t = setup();

    let (status, _, _) = t
        .send(post("/api/products", None, &json!({"name": "x", "price": 1})))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_by_name() {
    let t = setup();

    let (status, _, body) = t.send(get("/api/search?q=Key", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Key");
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Mechanical Keyboard");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_search_without_term_lists_everything() {
    let t = setup();

    let (_, _, body) = t.send(get("/api/search", None)).await;

    assert_eq!(body["query"], "");
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn test_search_error_still_answers_ok() {
    let t = setup();

    let (status, _, body) = t
        .send(get(&format!("/api/search?q={}", urlencoding::encode("'")), None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_reviews_are_stored_verbatim() {
    let t = setup();
    let token = t.token_for("bob");
    let product_id = t.product_id("USB-C Hub");
    let comment = "<img src=x onerror=alert(document.cookie)>";

    let (status, _, body) = t
        .send(post(
            "/api/reviews",
            Some(&token),
            &json!({"product_id": product_id, "rating": 1, "comment": comment}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review added");

    let (status, _, body) = t
        .send(get(&format!("/api/reviews/{}", product_id), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["comment"], comment);
    assert_eq!(reviews[0]["username"], "bob");
    assert_eq!(reviews[0]["rating"], 1);
}

#[tokio::test]
async fn test_seeded_review_is_listed() {
    let t = setup();
    let product_id = t.product_id("Mechanical Keyboard");

    let (_, _, body) = t
        .send(get(&format!("/api/reviews/{}", product_id), None))
        .await;

    assert_eq!(body[0]["username"], "alice");
    assert_eq!(body[0]["comment"], "Great keyboard, <b>fast</b> shipping!");
}

#[tokio::test]
async fn test_null_fields_are_stored_as_null() {
    let t = setup();
    let token = t.token_for("bob");

    let (status, _, body) = t
        .send(post(
            "/api/products",
            Some(&token),
            &json!({"name": "Mystery Box", "price": null, "category": "Misc"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["productId"].as_i64().unwrap();

    let (_, _, product) = t.send(get(&format!("/api/products/{}", id), None)).await;
    assert!(product["price"].is_null());
    assert_eq!(product["description"], "undefined");

    let (status, _, _) = t
        .send(post(
            "/api/reviews",
            Some(&token),
            &json!({"product_id": id, "rating": null, "comment": "no stars"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, reviews) = t.send(get(&format!("/api/reviews/{}", id), None)).await;
    assert!(reviews[0]["rating"].is_null());
    assert_eq!(reviews[0]["comment"], "no stars");
}
