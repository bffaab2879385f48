//! Typed CRUD handle for one entity over a shared [`Store`].

use crate::error::{AppError, ConfigError};
use crate::schema::{Attributes, Entity, EntitySchema, Id, WriteMode};
use crate::store::{Page, Store};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Repository<E> {
    store: Arc<dyn Store>,
    schema: Arc<EntitySchema>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            store: Arc::clone(&self.store),
            schema: Arc::clone(&self.schema),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn Store>, namespace: &str) -> Result<Self, ConfigError> {
        Ok(Repository {
            store,
            schema: Arc::new(EntitySchema::of::<E>(namespace)?),
            _entity: PhantomData,
        })
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Runs the entity's validation rules against a write.
    pub fn validate(&self, attrs: &Attributes, mode: WriteMode) -> Result<(), AppError> {
        E::validate(&self.schema, attrs, mode)
    }

    pub async fn ensure_table(&self) -> Result<(), AppError> {
        self.store.ensure_table(&self.schema).await
    }

    pub async fn insert_one(&self, attrs: &Attributes) -> Result<E, AppError> {
        let row = self.store.insert(&self.schema, attrs).await?;
        self.decode(row)
    }

    pub async fn find_all(&self, page: Page) -> Result<Vec<E>, AppError> {
        self.store
            .list(&self.schema, page)
            .await?
            .into_iter()
            .map(|row| self.decode(row))
            .collect()
    }

    pub async fn find_by_id(&self, id: Id) -> Result<Option<E>, AppError> {
        self.store
            .read(&self.schema, id)
            .await?
            .map(|row| self.decode(row))
            .transpose()
    }

    /// `None` when no row has `id`; nothing is modified in that case.
    pub async fn update_by_id(&self, id: Id, attrs: &Attributes) -> Result<Option<E>, AppError> {
        self.store
            .update(&self.schema, id, attrs)
            .await?
            .map(|row| self.decode(row))
            .transpose()
    }

    /// True when a row was removed.
    pub async fn delete_by_id(&self, id: Id) -> Result<bool, AppError> {
        Ok(self.store.delete(&self.schema, id).await?.is_some())
    }

    fn decode(&self, row: Value) -> Result<E, AppError> {
        serde_json::from_value(row).map_err(|e| {
            AppError::Internal(format!("row of {} does not decode: {}", self.schema.qualified_name(), e))
        })
    }
}
