use crate::schema::{ColumnSpec, ColumnType, Entity, Id};
use serde::{Deserialize, Serialize};

/// Append-style audit record. Exposed without a delete route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActionLog {
    pub log_id: Id,
    pub user_id: i64,
    pub action: String,
    pub details: Option<String>,
}

impl Entity for UserActionLog {
    const TABLE: &'static str = "user_actions_log";

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::primary("log_id"),
            ColumnSpec::new("user_id", ColumnType::BigInt).minimum(1),
            ColumnSpec::new("action", ColumnType::Varchar(64)).min_length(1),
            ColumnSpec::new("details", ColumnType::Text).nullable(),
        ]
    }
}
