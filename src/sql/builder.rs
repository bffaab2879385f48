//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from an entity schema.

use crate::schema::{Attributes, ColumnSpec, EntitySchema, Id};
use crate::store::Page;
use serde_json::Value;

/// Hard cap on rows returned by one list call.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Quote identifier for PostgreSQL (safe: only from schema definitions).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub(crate) fn qualified_table(schema: &EntitySchema) -> String {
    format!("{}.{}", quoted(schema.namespace()), quoted(schema.table()))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its cast placeholder (`$n::type`).
    fn push_param(&mut self, col: &ColumnSpec, v: Value) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), col.ty.cast())
    }
}

fn select_column_list(schema: &EntitySchema) -> String {
    schema
        .columns()
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key.
pub fn select_by_id(schema: &EntitySchema, id: Id) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = schema.primary_key();
    let ph = q.push_param(pk, Value::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(schema),
        qualified_table(schema),
        quoted(pk.name),
        ph
    );
    q
}

/// SELECT all rows in identifier (insertion) order, optionally paged.
pub fn select_list(schema: &EntitySchema, page: Page) -> QueryBuf {
    let mut q = QueryBuf::new();
    let limit_clause = page
        .limit
        .map(|n| format!(" LIMIT {}", n.min(MAX_PAGE_SIZE)))
        .unwrap_or_default();
    let offset_clause = page.offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}{}{}",
        select_column_list(schema),
        qualified_table(schema),
        quoted(schema.primary_key().name),
        limit_clause,
        offset_clause
    );
    q
}

/// INSERT: columns in schema order, only those present in body; the store fills
/// the identifier, defaults and NULLs for the rest.
pub fn insert(schema: &EntitySchema, body: &Attributes) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in schema.columns() {
        if c.primary {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        placeholders.push(q.push_param(c, val.clone()));
        cols.push(quoted(c.name));
    }
    let returning = select_column_list(schema);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            table,
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only schema columns present in body, in schema order.
/// Returns None when nothing in body is updatable.
pub fn update(schema: &EntitySchema, id: Id, body: &Attributes) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let pk = schema.primary_key();
    let mut sets = Vec::new();
    for c in schema.columns() {
        if c.primary {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        let rhs = q.push_param(c, val.clone());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    if sets.is_empty() {
        return None;
    }
    let id_ph = q.push_param(pk, Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        qualified_table(schema),
        sets.join(", "),
        quoted(pk.name),
        id_ph,
        select_column_list(schema)
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(schema: &EntitySchema, id: Id) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = schema.primary_key();
    let ph = q.push_param(pk, Value::from(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        qualified_table(schema),
        quoted(pk.name),
        ph,
        select_column_list(schema)
    );
    q
}
