//! Generic CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::schema::{Attributes, ColumnType, EntitySchema, Id};
use crate::sql::{self, ddl, PgBindValue, QueryBuf};
use crate::store::{Page, Store};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// Store backed by the shared connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_optional(&self, schema: &EntitySchema, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(schema, e))?;
        Ok(row.map(|r| row_to_json(schema, &r)))
    }

    async fn fetch_all(&self, schema: &EntitySchema, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(schema, e))?;
        Ok(rows.iter().map(|r| row_to_json(schema, r)).collect())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_table(&self, schema: &EntitySchema) -> Result<(), AppError> {
        for stmt in ddl::create_table(schema) {
            tracing::debug!(sql = %stmt, "ddl");
            sqlx::query(&stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn insert(&self, schema: &EntitySchema, attrs: &Attributes) -> Result<Value, AppError> {
        let q = sql::insert(schema, attrs);
        self.fetch_optional(schema, &q)
            .await?
            .ok_or_else(|| AppError::Internal(format!("insert into {} returned no row", schema.qualified_name())))
    }

    async fn list(&self, schema: &EntitySchema, page: Page) -> Result<Vec<Value>, AppError> {
        self.fetch_all(schema, &sql::select_list(schema, page)).await
    }

    async fn read(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError> {
        self.fetch_optional(schema, &sql::select_by_id(schema, id)).await
    }

    async fn update(&self, schema: &EntitySchema, id: Id, attrs: &Attributes) -> Result<Option<Value>, AppError> {
        match sql::update(schema, id, attrs) {
            Some(q) => self.fetch_optional(schema, &q).await,
            None => self.read(schema, id).await,
        }
    }

    async fn delete(&self, schema: &EntitySchema, id: Id) -> Result<Option<Value>, AppError> {
        self.fetch_optional(schema, &sql::delete(schema, id)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    params: &[Value],
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for p in params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

/// Unique violations become [`AppError::Conflict`] named after the column; everything else stays a database fault.
fn classify(schema: &EntitySchema, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let column = db
                .constraint()
                .and_then(|c| schema.column_for_constraint(c))
                .map(|c| c.name);
            return AppError::Conflict(schema.conflict_message(column));
        }
    }
    AppError::Db(err)
}

fn row_to_json(schema: &EntitySchema, row: &PgRow) -> Value {
    let mut map = serde_json::Map::new();
    for col in schema.columns() {
        map.insert(col.name.to_string(), cell_to_value(row, col.name, col.ty));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str, ty: ColumnType) -> Value {
    let decoded = match ty {
        ColumnType::Id | ColumnType::BigInt => row.try_get::<Option<i64>, _>(name).map(|v| v.map(Value::from)),
        ColumnType::Varchar(_) | ColumnType::Text => row.try_get::<Option<String>, _>(name).map(|v| v.map(Value::from)),
        ColumnType::Boolean => row.try_get::<Option<bool>, _>(name).map(|v| v.map(Value::from)),
    };
    match decoded {
        Ok(v) => v.unwrap_or(Value::Null),
        Err(e) => {
            tracing::warn!(column = name, error = %e, "column decode failed");
            Value::Null
        }
    }
}
