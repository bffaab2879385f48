use crate::schema::{ColumnSpec, ColumnType, Entity, Id};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub office_id: Id,
    pub city: String,
}

impl Entity for Office {
    const TABLE: &'static str = "offices";
    const HARD_DELETE: bool = true;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::primary("office_id"),
            ColumnSpec::new("city", ColumnType::Varchar(100)).unique().min_length(1),
        ]
    }
}
