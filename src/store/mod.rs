//! Persistence boundary: one trait, a PostgreSQL implementation and an in-memory one.
//!
//! Stores speak JSON rows (`serde_json::Value` objects keyed by column name) and
//! report unique violations as [`AppError::Conflict`]; a missing identifier is
//! `None`, never an error.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::schema::{Attributes, EntitySchema, Id};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Optional paging for list calls. Both unset means every row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Page {
    pub fn all() -> Self {
        Page::default()
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Create the table (and its namespace) if missing. Idempotent.
    async fn ensure_table(&self, schema: &EntitySchema) -> Result<(), AppError>;

    /// Insert one row; the store assigns the identifier. Returns the stored row.
    async fn insert(&self, schema: &EntitySchema, attrs: &Attributes) -> Result<Value, AppError>;

    /// Rows in identifier order.
    async fn list(&self, schema: &EntitySchema, page: Page) -> Result<Vec<Value>, AppError>;

    async fn read(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError>;

    /// Apply attrs to one row. None when no row has `id`.
    async fn update(&self, schema: &EntitySchema, id: Id, attrs: &Attributes) -> Result<Option<Value>, AppError>;

    /// Remove one row. Returns the removed row, None when no row has `id`.
    async fn delete(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError>;

    /// Cheap liveness probe used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
