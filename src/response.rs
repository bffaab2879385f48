//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

fn one<T: Serialize>(status: StatusCode, data: T, meta: Option<serde_json::Value>) -> (StatusCode, Json<SuccessOne<T>>) {
    (status, Json(SuccessOne { data, meta }))
}

/// 201 with the created row.
pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    one(StatusCode::CREATED, data, None)
}

/// 200 with a single row.
pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    one(StatusCode::OK, data, None)
}

/// 200 with the row and how many rows the write touched.
pub fn success_affected<T: Serialize>(data: T, affected: u64) -> (StatusCode, Json<SuccessOne<T>>) {
    one(StatusCode::OK, data, Some(serde_json::json!({ "affected": affected })))
}

/// 200 with every row and the row count in `meta`.
pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (StatusCode::OK, Json(SuccessMany { data, meta: MetaCount { count } }))
}
