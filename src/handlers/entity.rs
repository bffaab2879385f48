//! Generic entity handlers: create, list, get, update, delete. One router per entity type
//! supplies the [`Repository`] as state.

use crate::error::AppError;
use crate::repository::Repository;
use crate::response::{success_affected, success_many, success_one, success_one_ok};
use crate::schema::{Attributes, Entity, Id, WriteMode};
use crate::store::Page;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<Id, AppError> {
    id_str
        .parse::<Id>()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Attributes, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    match value {
        Value::Object(m) => Ok(m.into_iter().collect()),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn not_found<E: Entity>(id: Id) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", E::TABLE, id))
}

pub async fn create<E: Entity>(
    State(repo): State<Repository<E>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let attrs = body_to_map(body)?;
    repo.validate(&attrs, WriteMode::Create)?;
    let row = repo.insert_one(&attrs).await?;
    tracing::info!(table = E::TABLE, "row created");
    Ok(success_one(row))
}

pub async fn list<E: Entity>(
    State(repo): State<Repository<E>>,
    page: Result<Query<Page>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(page) = page.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let rows = repo.find_all(page).await?;
    Ok(success_many(rows))
}

pub async fn read<E: Entity>(
    State(repo): State<Repository<E>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = repo.find_by_id(id).await?.ok_or_else(|| not_found::<E>(id))?;
    Ok(success_one_ok(row))
}

pub async fn update<E: Entity>(
    State(repo): State<Repository<E>>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let attrs = body_to_map(body)?;
    repo.validate(&attrs, WriteMode::Update)?;
    let row = repo
        .update_by_id(id, &attrs)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;
    tracing::info!(table = E::TABLE, id, "row updated");
    Ok(success_affected(row, 1))
}

pub async fn delete<E: Entity>(
    State(repo): State<Repository<E>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !repo.delete_by_id(id).await? {
        return Err(not_found::<E>(id));
    }
    tracing::info!(table = E::TABLE, id, "row deleted");
    Ok(StatusCode::NO_CONTENT)
}
