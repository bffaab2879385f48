//! Integration tests for the /acc_permissions resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_applies_is_active_default() {
    let app = build_test_app().await;
    let response = post_json(&app, "/acc_permissions/create", json!({"name": "offices.read"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await["data"],
        json!({"permission_id": 1, "name": "offices.read", "description": null, "is_active": true})
    );
}

#[tokio::test]
async fn name_must_match_pattern() {
    let app = build_test_app().await;
    let response = post_json(&app, "/acc_permissions/create", json!({"name": "Offices Read"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["details"][0]["field"], "name");
    assert_eq!(json["error"]["details"][0]["message"], "does not match required pattern");
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = build_test_app().await;
    post_json(&app, "/acc_permissions/create", json!({"name": "offices.write"})).await;
    let response = post_json(&app, "/acc_permissions/create", json!({"name": "offices.write"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_toggles_is_active() {
    let app = build_test_app().await;
    post_json(&app, "/acc_permissions/create", json!({"name": "areas.read"})).await;

    let response = put_json(&app, "/acc_permissions/update/1", json!({"is_active": false})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let response = put_json(&app, "/acc_permissions/update/1", json!({"is_active": "no"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn permissions_have_no_delete_route() {
    let app = build_test_app().await;
    post_json(&app, "/acc_permissions/create", json!({"name": "areas.read"})).await;
    let response = delete(&app, "/acc_permissions/delete/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/acc_permissions/get/1").await.status(), StatusCode::OK);
}
