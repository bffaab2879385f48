use crate::schema::{ColumnSpec, ColumnType, Entity, Id};
use serde::{Deserialize, Serialize};

/// A named functional area (e.g. "Finance").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub area_id: Id,
    pub title: String,
    pub description: Option<String>,
}

impl Entity for Area {
    const TABLE: &'static str = "areas";

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::primary("area_id"),
            ColumnSpec::new("title", ColumnType::Varchar(100)).unique().min_length(1),
            ColumnSpec::new("description", ColumnType::Text).nullable(),
        ]
    }
}
