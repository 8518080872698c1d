#[path = "../common/mod.rs"]
mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_admin_routes_require_a_session() {
    let t = setup();

    for request in [
        get("/api/admin/users", None),
        get("/api/admin/secret", None),
        post("/api/admin/ping", None, &json!({"host": "127.0.0.1"})),
        post("/api/export-pdf", None, &json!({"url": "http://127.0.0.1/"})),
    ] {
        let (status, _, body) = t.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Authentication required");
    }
}

#[tokio::test]
async fn test_any_user_can_list_users() {
    let t = setup();
    let token = t.token_for("bob");

    let (status, _, body) = t.send(get("/api/admin/users", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().any(|u| u["username"] == "admin" && u["role"] == "admin"));
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn test_any_user_can_delete_users() {
    let t = setup();
    let token = t.token_for("bob");
    let admin_id = t.user_id("admin");

    let (status, _, body) = t
        .send(json_request(
            "DELETE",
            &format!("/api/admin/users/{}", admin_id),
            Some(&token),
            &json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, _, _) = t.send(get(&format!("/api/user/{}", admin_id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_secret_reports_jwt_session_and_internals() {
    let t = setup();
    let token = t.token_for("alice");

    let (status, _, body) = t.send(get("/api/admin/secret", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "Authenticated via JWT");
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"]["exp"].is_number());
    assert_eq!(body["internal_config"]["jwt_secret"], TEST_SECRET);
    assert_eq!(
        body["internal_config"]["database_path"],
        t.state.config.database_path.as_str()
    );
}

#[tokio::test]
async fn test_login_token_opens_a_session() {
    let t = setup();

    let (_, _, login) = t
        .send(post(
            "/api/login",
            None,
            &json!({"username": "alice", "password": "password123"}),
        ))
        .await;
    let token = login["token"].as_str().unwrap();

    let (status, _, body) = t.send(get("/api/orders", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
