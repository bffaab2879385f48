//! Integration tests for the /user_actions_log resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json};
use serde_json::json;

#[tokio::test]
async fn log_entries_are_created_and_listed() {
    let app = build_test_app().await;
    for action in ["login", "logout"] {
        let response = post_json(&app, "/user_actions_log/create", json!({"user_id": 7, "action": action})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let json = body_json(get(&app, "/user_actions_log/list").await).await;
    assert_eq!(json["meta"]["count"], 2);
    assert_eq!(json["data"][1], json!({"log_id": 2, "user_id": 7, "action": "logout", "details": null}));
}

#[tokio::test]
async fn user_id_must_be_a_positive_integer() {
    let app = build_test_app().await;
    let response = post_json(&app, "/user_actions_log/create", json!({"user_id": "7", "action": "login"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"][0]["message"], "must be an integer");

    let response = post_json(&app, "/user_actions_log/create", json!({"user_id": 0, "action": "login"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn log_entries_cannot_be_deleted() {
    let app = build_test_app().await;
    post_json(&app, "/user_actions_log/create", json!({"user_id": 7, "action": "login"})).await;
    let response = delete(&app, "/user_actions_log/delete/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "not_found");
}
