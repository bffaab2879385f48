//! Column specifications: declared type, nullability, uniqueness and write rules.

use serde_json::Value;

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Surrogate identifier assigned by the store (BIGSERIAL).
    Id,
    BigInt,
    /// Bounded string; the bound is in characters.
    Varchar(u32),
    Text,
    Boolean,
}

impl ColumnType {
    /// Type used in CREATE TABLE.
    pub fn ddl(&self) -> String {
        match self {
            ColumnType::Id => "BIGSERIAL".into(),
            ColumnType::BigInt => "BIGINT".into(),
            ColumnType::Varchar(n) => format!("VARCHAR({})", n),
            ColumnType::Text => "TEXT".into(),
            ColumnType::Boolean => "BOOLEAN".into(),
        }
    }

    /// Type used for parameter casts (`$n::cast`).
    pub fn cast(&self) -> &'static str {
        match self {
            ColumnType::Id | ColumnType::BigInt => "bigint",
            ColumnType::Varchar(_) | ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::Varchar(_) | ColumnType::Text)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::Id | ColumnType::BigInt)
    }

    /// Whether `value` (non-null) has the JSON shape this column stores.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ColumnType::Id | ColumnType::BigInt => value.as_i64().is_some(),
            ColumnType::Varchar(_) | ColumnType::Text => value.is_string(),
            ColumnType::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub primary: bool,
    /// Literal the store applies when an insert omits the column.
    pub default: Option<Value>,
    /// Minimum length in characters after trimming.
    pub min_length: Option<u32>,
    pub pattern: Option<&'static str>,
    pub minimum: Option<i64>,
}

impl ColumnSpec {
    /// Non-null attribute column with no constraints.
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        ColumnSpec {
            name,
            ty,
            nullable: false,
            unique: false,
            primary: false,
            default: None,
            min_length: None,
            pattern: None,
            minimum: None,
        }
    }

    /// Store-assigned surrogate identifier.
    pub fn primary(name: &'static str) -> Self {
        ColumnSpec {
            primary: true,
            ..ColumnSpec::new(name, ColumnType::Id)
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn min_length(mut self, n: u32) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn minimum(mut self, n: i64) -> Self {
        self.minimum = Some(n);
        self
    }

    /// Must be supplied on create.
    pub fn is_required(&self) -> bool {
        !self.primary && !self.nullable && self.default.is_none()
    }

    pub fn max_length(&self) -> Option<u32> {
        match self.ty {
            ColumnType::Varchar(n) => Some(n),
            _ => None,
        }
    }
}
