//! DDL for entity tables: namespace, columns, primary key and named unique constraints.
//! Every statement is idempotent (IF NOT EXISTS) so provisioning can run on each start.

use crate::schema::{ColumnSpec, EntitySchema};
use crate::sql::builder::{qualified_table, quoted};
use serde_json::Value;

/// Statements that bring the namespace and table into existence, in execution order.
pub fn create_table(schema: &EntitySchema) -> Vec<String> {
    let mut col_defs: Vec<String> = schema.columns().iter().map(column_def).collect();
    col_defs.push(format!("PRIMARY KEY ({})", quoted(schema.primary_key().name)));
    for c in schema.columns().iter().filter(|c| c.unique) {
        col_defs.push(format!(
            "CONSTRAINT {} UNIQUE ({})",
            quoted(&schema.unique_constraint_name(c.name)),
            quoted(c.name)
        ));
    }
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema.namespace())),
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            qualified_table(schema),
            col_defs.join(",\n  ")
        ),
    ]
}

fn column_def(c: &ColumnSpec) -> String {
    let mut def = format!("{} {}", quoted(c.name), c.ty.ddl());
    if !c.nullable && !c.primary {
        def.push_str(" NOT NULL");
    }
    if let Some(d) = &c.default {
        def.push_str(" DEFAULT ");
        def.push_str(&literal(d));
    }
    def
}

fn literal(v: &Value) -> String {
    match v {
        Value::Null => "NULL".into(),
        Value::Bool(true) => "TRUE".into(),
        Value::Bool(false) => "FALSE".into(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}
