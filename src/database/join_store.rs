use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::TryStreamExt;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::database::manager::DatabaseError;
use crate::fetch::catalog::{Column, ColumnType, TIMESTAMP_FORMAT};
use crate::fetch::executor::{JoinQuery, JoinStore, RawRow};

/// Join store backed by the shared Postgres pool.
///
/// Each call holds one pooled connection for the duration of the query; the
/// connection goes back to the pool when it is dropped, on success or error.
#[derive(Clone)]
pub struct PgJoinStore {
    pool: PgPool,
}

impl PgJoinStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinStore for PgJoinStore {
    async fn fetch_rows(&self, query: &JoinQuery) -> Result<Vec<RawRow>, DatabaseError> {
        let sql = query.to_sql();
        let mut conn = self.pool.acquire().await?;

        let mut q = sqlx::query(&sql.query);
        for param in &sql.params {
            q = bind_param(q, param);
        }

        let mut rows = Vec::new();
        let mut stream = q.fetch(&mut *conn);
        while let Some(row) = stream.try_next().await? {
            rows.push(decode_row(&row, &query.projection)?);
        }
        Ok(rows)
    }
}

fn bind_param<'q>(q: Query<'q, Postgres, PgArguments>, v: &'q Value) -> Query<'q, Postgres, PgArguments> {
    match v {
        Value::Null => q.bind(None::<String>),
        Value::String(s) => q.bind(s.as_str()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => q.bind(i),
            None => q.bind(n.to_string()),
        },
        other => q.bind(other.to_string()),
    }
}

// Columns come back in projection order, so decode by position using the catalog type
fn decode_row(row: &PgRow, projection: &[Column]) -> Result<RawRow, sqlx::Error> {
    let mut raw = RawRow::default();
    for (index, column) in projection.iter().enumerate() {
        let value = match column.kind {
            ColumnType::BigInt => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
            ColumnType::Text => row.try_get::<Option<String>, _>(index)?.map(Value::String),
            ColumnType::Timestamp => row
                .try_get::<Option<NaiveDateTime>, _>(index)?
                .map(|ts| Value::String(ts.format(TIMESTAMP_FORMAT).to_string())),
        };
        raw.insert(*column, value.unwrap_or(Value::Null));
    }
    Ok(raw)
}
