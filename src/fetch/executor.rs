use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::catalog::Column;
use super::condition::Condition;
use super::error::FetchError;
use super::types::SqlResult;
use crate::database::manager::DatabaseError;
use crate::fetch::catalog::columns;
use crate::types::EntityKind;

static NULL: Value = Value::Null;

/// One row of the joined result set, keyed by physical column.
/// Columns missing from the projection read as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    values: HashMap<Column, Value>,
}

impl RawRow {
    pub fn with(mut self, column: Column, value: Value) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: Column, value: Value) {
        self.values.insert(column, value);
    }

    pub fn get(&self, column: &Column) -> &Value {
        self.values.get(column).unwrap_or(&NULL)
    }

    /// Column value as text, the way a `::text` cast would see it
    pub fn text(&self, column: &Column) -> Option<String> {
        match self.get(column) {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Primary rows survive without a related match
    Left,
    /// Only rows with both sides present
    Inner,
}

/// A single joined SELECT over campaign and ad_group
#[derive(Debug, Clone)]
pub struct JoinQuery {
    pub primary: EntityKind,
    pub join: JoinType,
    pub projection: Vec<Column>,
    pub condition: Option<Condition>,
}

impl JoinQuery {
    /// Campaign-primary queries LEFT JOIN ad groups; AdGroup-primary queries
    /// INNER JOIN their campaign. Both conditions are AND-ed into one WHERE.
    pub fn new(
        primary: EntityKind,
        primary_columns: Vec<Column>,
        related_columns: Vec<Column>,
        primary_condition: Option<Condition>,
        related_condition: Option<Condition>,
    ) -> Self {
        let join = match primary {
            EntityKind::Campaign => JoinType::Left,
            EntityKind::AdGroup => JoinType::Inner,
        };

        let mut projection: Vec<Column> = Vec::with_capacity(primary_columns.len() + related_columns.len());
        for column in primary_columns.into_iter().chain(related_columns) {
            if !projection.contains(&column) {
                projection.push(column);
            }
        }

        let condition = Condition::all(primary_condition.into_iter().chain(related_condition).collect());

        Self { primary, join, projection, condition }
    }

    pub fn related(&self) -> EntityKind {
        self.primary.other()
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut params = Vec::new();

        let select = self
            .projection
            .iter()
            .map(|c| format!("{} AS \"{}\"", c.qualified(), c.alias()))
            .collect::<Vec<_>>()
            .join(", ");

        let join = match self.join {
            JoinType::Left => "LEFT JOIN",
            JoinType::Inner => "INNER JOIN",
        };

        let mut query = format!(
            "SELECT {} FROM \"{}\" {} \"{}\" ON {} = {}",
            select,
            self.primary.table().name(),
            join,
            self.related().table().name(),
            columns::AD_GROUP_CAMPAIGN_ID.qualified(),
            columns::CAMPAIGN_ID.qualified(),
        );

        if let Some(condition) = &self.condition {
            query.push_str(" WHERE ");
            query.push_str(&condition.to_sql(&mut params));
        }

        query.push_str(&format!(
            " ORDER BY {} ASC, {} ASC",
            self.primary.id_column().qualified(),
            self.related().id_column().qualified()
        ));

        SqlResult { query, params }
    }
}

/// Source of joined rows
#[async_trait]
pub trait JoinStore: Send + Sync {
    async fn fetch_rows(&self, query: &JoinQuery) -> Result<Vec<RawRow>, DatabaseError>;
}

/// Run the join. The limit is logged only: it counts primary objects,
/// not rows, so it is applied after grouping.
pub async fn execute<S: JoinStore + ?Sized>(
    store: &S,
    query: &JoinQuery,
    limit_hint: i64,
) -> Result<Vec<RawRow>, FetchError> {
    tracing::debug!(
        "Executing {:?}-primary join over {} columns (limit hint {})",
        query.primary,
        query.projection.len(),
        limit_hint
    );
    let rows = store.fetch_rows(query).await?;
    tracing::debug!("Join returned {} rows", rows.len());
    Ok(rows)
}
