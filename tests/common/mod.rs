#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use office_admin::config::ServerConfig;
use office_admin::{app, AppState, JwtValidator, MemoryStore};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the full application router over a fresh in-memory store with token
/// validation enabled. Tables are provisioned exactly as at startup.
pub async fn build_test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), "public")
        .with_tokens(Arc::new(JwtValidator::new(TEST_SECRET)));
    build_app_with_state(state).await
}

/// Same as [`build_test_app`] without a token validator.
pub async fn build_test_app_without_tokens() -> Router {
    build_app_with_state(AppState::new(Arc::new(MemoryStore::new()), "public")).await
}

async fn build_app_with_state(state: AppState) -> Router {
    state.sync_schemas().await.expect("provision tables");
    app(state, &ServerConfig::default()).expect("build router")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_request(app: &Router, method: Method, uri: &str, body: &Value) -> Response {
    raw_json_request(app, method, uri, body.to_string()).await
}

pub async fn raw_json_request(app: &Router, method: Method, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    json_request(app, Method::POST, uri, &body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response {
    json_request(app, Method::PUT, uri, &body).await
}

pub async fn post_with_bearer(app: &Router, uri: &str, token: &str, body: Option<Value>) -> Response {
    let builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    let request = match body {
        Some(b) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
