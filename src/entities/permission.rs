use crate::schema::{ColumnSpec, ColumnType, Entity, Id};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Permission names are lowercase dotted keys such as `offices.read`.
pub const PERMISSION_NAME_PATTERN: &str = r"^[a-z][a-z0-9_.:-]*$";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccPermission {
    pub permission_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Entity for AccPermission {
    const TABLE: &'static str = "acc_permissions";

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::primary("permission_id"),
            ColumnSpec::new("name", ColumnType::Varchar(64))
                .unique()
                .pattern(PERMISSION_NAME_PATTERN),
            ColumnSpec::new("description", ColumnType::Text).nullable(),
            ColumnSpec::new("is_active", ColumnType::Boolean).default_value(Value::Bool(true)),
        ]
    }
}
