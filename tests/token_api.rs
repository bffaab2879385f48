//! Integration tests for POST /middleware/validate-token.

mod common;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_without_tokens, post_json, post_with_bearer, TEST_SECRET};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

const VALIDATE: &str = "/middleware/validate-token";

fn sign(claims: Value, secret: &str) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

fn valid_token() -> String {
    let exp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() + 600;
    sign(json!({"sub": "17", "role": "admin", "exp": exp}), TEST_SECRET)
}

#[tokio::test]
async fn bearer_header_token_is_accepted() {
    let app = build_test_app().await;
    let response = post_with_bearer(&app, VALIDATE, &valid_token(), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], true);
    assert_eq!(json["data"]["claims"]["sub"], "17");
}

#[tokio::test]
async fn body_token_is_accepted() {
    let app = build_test_app().await;
    let response = post_json(&app, VALIDATE, json!({ "token": valid_token() })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["claims"]["role"], "admin");
}

#[tokio::test]
async fn header_wins_over_body() {
    let app = build_test_app().await;
    let response = post_with_bearer(&app, VALIDATE, "garbage", Some(json!({ "token": valid_token() }))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_or_forged_token_is_unauthorized() {
    let app = build_test_app().await;
    let response = post_json(&app, VALIDATE, json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "unauthorized");

    let forged = sign(json!({"sub": "17", "exp": 4_102_444_800u64}), "wrong-secret");
    let response = post_with_bearer(&app, VALIDATE, &forged, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unconfigured_validator_is_unavailable() {
    let app = build_test_app_without_tokens().await;
    let response = post_with_bearer(&app, VALIDATE, &valid_token(), None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"]["code"], "unavailable");
}
