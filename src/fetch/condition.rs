use serde_json::Value;

use super::catalog::{Column, ColumnType, PG_TIMESTAMP_FORMAT};
use super::executor::RawRow;

/// Boolean condition over physical columns.
///
/// Only what the compiler can produce: case-insensitive equality, IN, and
/// flat AND / OR groups.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    EqualsIgnoreCase { column: Column, value: String },
    In { column: Column, values: Vec<String> },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn equals_ignore_case(column: Column, value: impl Into<String>) -> Self {
        Condition::EqualsIgnoreCase { column, value: value.into() }
    }

    pub fn is_in(column: Column, values: Vec<String>) -> Self {
        Condition::In { column, values }
    }

    /// AND of the given conditions. Nothing to combine gives `None`, one gives itself.
    pub fn all(mut conditions: Vec<Condition>) -> Option<Condition> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(Condition::And(conditions)),
        }
    }

    /// OR of the given conditions, same collapsing rules as [`Condition::all`]
    pub fn any(mut conditions: Vec<Condition>) -> Option<Condition> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(Condition::Or(conditions)),
        }
    }

    /// Render as SQL, pushing bind values onto `params` and referencing them as `$n`.
    pub fn to_sql(&self, params: &mut Vec<Value>) -> String {
        match self {
            Condition::EqualsIgnoreCase { column, value } => {
                let lhs = text_expr(column);
                let rhs = param(params, value);
                format!("lower({}) = lower({})", lhs, rhs)
            }
            Condition::In { column, values } => {
                if values.is_empty() {
                    return "1 = 0".to_string();
                }
                let placeholders: Vec<String> = values.iter().map(|v| param(params, v)).collect();
                format!("{} IN ({})", text_expr(column), placeholders.join(", "))
            }
            Condition::And(parts) => join(parts, " AND ", params),
            Condition::Or(parts) => join(parts, " OR ", params),
        }
    }

    /// Evaluate against one joined row. Null columns never match.
    pub fn matches(&self, row: &RawRow) -> bool {
        match self {
            Condition::EqualsIgnoreCase { column, value } => row
                .text(column)
                .map(|text| text.to_lowercase() == value.to_lowercase())
                .unwrap_or(false),
            Condition::In { column, values } => row
                .text(column)
                .map(|text| values.iter().any(|v| *v == text))
                .unwrap_or(false),
            Condition::And(parts) => parts.iter().all(|c| c.matches(row)),
            Condition::Or(parts) => parts.iter().any(|c| c.matches(row)),
        }
    }
}

// Caller values always arrive as strings, so non-text columns are compared through their text form
fn text_expr(column: &Column) -> String {
    match column.kind {
        ColumnType::Text => column.qualified(),
        ColumnType::BigInt => format!("{}::text", column.qualified()),
        ColumnType::Timestamp => format!("to_char({}, '{}')", column.qualified(), PG_TIMESTAMP_FORMAT),
    }
}

fn param(params: &mut Vec<Value>, value: &str) -> String {
    params.push(Value::String(value.to_string()));
    format!("${}", params.len())
}

fn join(parts: &[Condition], joiner: &str, params: &mut Vec<Value>) -> String {
    parts
        .iter()
        .map(|c| format!("({})", c.to_sql(params)))
        .collect::<Vec<_>>()
        .join(joiner)
}
