//! Process-local store with the same contract as [`PgStore`](super::PgStore): assigned ids,
//! identifier ordering, unique columns and all-or-nothing writes.

use crate::error::AppError;
use crate::schema::{Attributes, EntitySchema, Id};
use crate::sql::MAX_PAGE_SIZE;
use crate::store::{Page, Store};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Table {
    next_id: Id,
    rows: BTreeMap<Id, Map<String, Value>>,
}

impl Default for Table {
    fn default() -> Self {
        Table {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// Tables keyed by qualified name. Each one must be created with `ensure_table` first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Table>>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

fn table_mut<'a>(tables: &'a mut HashMap<String, Table>, schema: &EntitySchema) -> Result<&'a mut Table, AppError> {
    let name = schema.qualified_name();
    tables
        .get_mut(&name)
        .ok_or_else(|| AppError::Internal(format!("relation {} does not exist", name)))
}

/// First unique column of `candidate` already held by a row other than `except`.
fn unique_clash(schema: &EntitySchema, table: &Table, candidate: &Map<String, Value>, except: Option<Id>) -> Option<&'static str> {
    schema.columns().iter().filter(|c| c.unique).find_map(|c| {
        let value = candidate.get(c.name).filter(|v| !v.is_null())?;
        table
            .rows
            .iter()
            .any(|(id, row)| Some(*id) != except && row.get(c.name) == Some(value))
            .then_some(c.name)
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_table(&self, schema: &EntitySchema) -> Result<(), AppError> {
        self.lock()?.entry(schema.qualified_name()).or_default();
        Ok(())
    }

    async fn insert(&self, schema: &EntitySchema, attrs: &Attributes) -> Result<Value, AppError> {
        let mut tables = self.lock()?;
        let table = table_mut(&mut tables, schema)?;
        let id = table.next_id;
        let pk = schema.primary_key().name;
        let mut row = Map::new();
        for col in schema.columns() {
            let value = if col.name == pk {
                Value::from(id)
            } else if let Some(v) = attrs.get(col.name) {
                v.clone()
            } else {
                col.default.clone().unwrap_or(Value::Null)
            };
            row.insert(col.name.to_string(), value);
        }
        if let Some(col) = unique_clash(schema, table, &row, None) {
            return Err(AppError::Conflict(schema.conflict_message(Some(col))));
        }
        table.next_id += 1;
        table.rows.insert(id, row.clone());
        Ok(Value::Object(row))
    }

    async fn list(&self, schema: &EntitySchema, page: Page) -> Result<Vec<Value>, AppError> {
        let mut tables = self.lock()?;
        let table = table_mut(&mut tables, schema)?;
        let offset = page.offset.unwrap_or(0) as usize;
        let limit = page.limit.map(|l| l.min(MAX_PAGE_SIZE) as usize).unwrap_or(usize::MAX);
        Ok(table
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .map(|r| Value::Object(r.clone()))
            .collect())
    }

    async fn read(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError> {
        let mut tables = self.lock()?;
        let table = table_mut(&mut tables, schema)?;
        Ok(table.rows.get(&id).map(|r| Value::Object(r.clone())))
    }

    async fn update(&self, schema: &EntitySchema, id: Id, attrs: &Attributes) -> Result<Option<Value>, AppError> {
        let mut tables = self.lock()?;
        let table = table_mut(&mut tables, schema)?;
        let Some(current) = table.rows.get(&id) else {
            return Ok(None);
        };
        let pk = schema.primary_key().name;
        let mut next = current.clone();
        for col in schema.columns().iter().filter(|c| c.name != pk) {
            if let Some(v) = attrs.get(col.name) {
                next.insert(col.name.to_string(), v.clone());
            }
        }
        if let Some(col) = unique_clash(schema, table, &next, Some(id)) {
            return Err(AppError::Conflict(schema.conflict_message(Some(col))));
        }
        table.rows.insert(id, next.clone());
        Ok(Some(Value::Object(next)))
    }

    async fn delete(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError> {
        let mut tables = self.lock()?;
        let table = table_mut(&mut tables, schema)?;
        Ok(table.rows.remove(&id).map(Value::Object))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
