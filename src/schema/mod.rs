//! Declarative entity schemas bound to a namespace, checked once at construction.

mod column;

pub use column::{ColumnSpec, ColumnType};

use crate::error::{AppError, ConfigError};
use crate::service::RequestValidator;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Surrogate row identifier.
pub type Id = i64;

/// Attribute values of one write request, keyed by column name.
pub type Attributes = HashMap<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// A table-backed record type. Rows decode into `Self` via serde.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: &'static str;
    /// Exposes delete-by-id on the resource router.
    const HARD_DELETE: bool = false;

    fn columns() -> Vec<ColumnSpec>;

    /// Checks a write before it reaches the store.
    fn validate(schema: &EntitySchema, attrs: &Attributes, mode: WriteMode) -> Result<(), AppError> {
        RequestValidator::validate(schema, attrs, mode)
    }
}

const MAX_IDENTIFIER_LEN: usize = 63;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static identifier pattern"))
}

fn is_identifier(s: &str) -> bool {
    s.len() <= MAX_IDENTIFIER_LEN && identifier_re().is_match(s)
}

/// Table name, namespace and column specs for one entity.
#[derive(Clone, Debug)]
pub struct EntitySchema {
    namespace: String,
    table: &'static str,
    columns: Vec<ColumnSpec>,
    pk_index: usize,
    patterns: HashMap<&'static str, Regex>,
}

impl EntitySchema {
    pub fn new(namespace: &str, table: &'static str, columns: Vec<ColumnSpec>) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidSchema {
            table: table.to_string(),
            reason,
        };
        if !is_identifier(namespace) {
            return Err(invalid(format!("namespace '{}' is not a plain identifier", namespace)));
        }
        if !is_identifier(table) {
            return Err(invalid("table name is not a plain identifier".into()));
        }

        let mut seen = HashSet::new();
        let mut patterns = HashMap::new();
        for c in &columns {
            if !is_identifier(c.name) {
                return Err(invalid(format!("column '{}' is not a plain identifier", c.name)));
            }
            if !seen.insert(c.name) {
                return Err(invalid(format!("duplicate column '{}'", c.name)));
            }
            if c.primary != (c.ty == ColumnType::Id) {
                return Err(invalid(format!("column '{}': only the primary key may use the identifier type", c.name)));
            }
            if let Some(default) = &c.default {
                if !c.ty.accepts(default) {
                    return Err(invalid(format!("column '{}': default does not match its type", c.name)));
                }
            }
            if (c.min_length.is_some() || c.pattern.is_some()) && !c.ty.is_string() {
                return Err(invalid(format!("column '{}': length and pattern rules need a string type", c.name)));
            }
            if c.minimum.is_some() && !c.ty.is_integer() {
                return Err(invalid(format!("column '{}': minimum needs an integer type", c.name)));
            }
            if let Some(p) = c.pattern {
                let re = Regex::new(p).map_err(|e| invalid(format!("column '{}': bad pattern: {}", c.name, e)))?;
                patterns.insert(c.name, re);
            }
        }

        let pks: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.primary)
            .map(|(i, _)| i)
            .collect();
        let pk_index = match pks.as_slice() {
            [i] => *i,
            [] => return Err(invalid("no primary key column".into())),
            _ => return Err(invalid("more than one primary key column".into())),
        };

        Ok(EntitySchema {
            namespace: namespace.to_string(),
            table,
            columns,
            pk_index,
            patterns,
        })
    }

    pub fn of<E: Entity>(namespace: &str) -> Result<Self, ConfigError> {
        Self::new(namespace, E::TABLE, E::columns())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// `namespace.table`, unquoted; used as a key and in log lines.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.table)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn primary_key(&self) -> &ColumnSpec {
        &self.columns[self.pk_index]
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn pattern(&self, column: &str) -> Option<&Regex> {
        self.patterns.get(column)
    }

    /// Name of the unique constraint the store creates for `column`.
    pub fn unique_constraint_name(&self, column: &str) -> String {
        format!("uq_{}_{}", self.table, column)
    }

    /// Reverse of [`unique_constraint_name`](Self::unique_constraint_name).
    pub fn column_for_constraint(&self, constraint: &str) -> Option<&ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| c.unique)
            .find(|c| self.unique_constraint_name(c.name) == constraint)
    }

    /// Client-facing message for a unique violation on `column`.
    pub fn conflict_message(&self, column: Option<&str>) -> String {
        match column {
            Some(col) => format!("{} with this {} already exists", self.table, col),
            None => format!("{} row violates a uniqueness constraint", self.table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn office_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::primary("office_id"),
            ColumnSpec::new("city", ColumnType::Varchar(100)).unique().min_length(1),
        ]
    }

    #[test]
    fn builds_schema_and_finds_primary_key() {
        let schema = EntitySchema::new("public", "offices", office_columns()).unwrap();
        assert_eq!(schema.primary_key().name, "office_id");
        assert_eq!(schema.qualified_name(), "public.offices");
        assert!(schema.column("city").unwrap().unique);
        assert!(schema.column("missing").is_none());
    }

    #[test]
    fn rejects_missing_primary_key() {
        let cols = vec![ColumnSpec::new("city", ColumnType::Text)];
        let err = EntitySchema::new("public", "offices", cols).unwrap_err();
        assert!(err.to_string().contains("no primary key"), "{err}");
    }

    #[test]
    fn rejects_two_primary_keys() {
        let cols = vec![ColumnSpec::primary("a"), ColumnSpec::primary("b")];
        assert!(EntitySchema::new("public", "t", cols).is_err());
    }

    #[test]
    fn rejects_identifier_type_on_plain_column() {
        let cols = vec![ColumnSpec::primary("id"), ColumnSpec::new("other", ColumnType::Id)];
        assert!(EntitySchema::new("public", "t", cols).is_err());
    }

    #[test]
    fn rejects_unsafe_namespace() {
        let err = EntitySchema::new("public; drop", "offices", office_columns()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let cols = vec![
            ColumnSpec::primary("id"),
            ColumnSpec::new("name", ColumnType::Text),
            ColumnSpec::new("name", ColumnType::Text),
        ];
        assert!(EntitySchema::new("public", "t", cols).is_err());
    }

    #[test]
    fn rejects_default_of_wrong_type() {
        let cols = vec![
            ColumnSpec::primary("id"),
            ColumnSpec::new("active", ColumnType::Boolean).default_value(json!("yes")),
        ];
        assert!(EntitySchema::new("public", "t", cols).is_err());
    }

    #[test]
    fn rejects_bad_pattern() {
        let cols = vec![
            ColumnSpec::primary("id"),
            ColumnSpec::new("name", ColumnType::Text).pattern("(["),
        ];
        assert!(EntitySchema::new("public", "t", cols).is_err());
    }

    #[test]
    fn maps_constraint_names_back_to_columns() {
        let schema = EntitySchema::new("public", "offices", office_columns()).unwrap();
        assert_eq!(schema.unique_constraint_name("city"), "uq_offices_city");
        assert_eq!(schema.column_for_constraint("uq_offices_city").unwrap().name, "city");
        assert!(schema.column_for_constraint("uq_offices_office_id").is_none());
        assert_eq!(
            schema.conflict_message(Some("city")),
            "offices with this city already exists"
        );
    }
}
