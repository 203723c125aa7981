use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FetchError;
use crate::database::models::{AdGroup, Campaign};

/// Filter operator as sent by the caller.
/// Anything other than EQUALS / IN parses fine but is rejected by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Equals,
    In,
    Unsupported(String),
}

impl From<String> for FilterOperator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "EQUALS" => FilterOperator::Equals,
            "IN" => FilterOperator::In,
            _ => FilterOperator::Unsupported(value),
        }
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOperator::Equals => f.write_str("EQUALS"),
            FilterOperator::In => f.write_str("IN"),
            FilterOperator::Unsupported(other) => f.write_str(other),
        }
    }
}

/// One caller predicate: `{"field": "adGroup.status", "operator": "IN", "values": ["ACTIVE"]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl QueryFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, values: Vec<&str>) -> Self {
        Self {
            field: field.into(),
            operator,
            values: values.into_iter().map(str::to_string).collect(),
        }
    }

    /// Parse the JSON-encoded `filters` query parameter. Blank input means no filters.
    pub fn parse_list(json: &str) -> Result<Vec<QueryFilter>, FetchError> {
        if json.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Caller inputs for one dynamic fetch
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub fields: Vec<String>,
    pub filters: Vec<QueryFilter>,
    pub limit: i64,
}

impl FetchRequest {
    pub const DEFAULT_LIMIT: i64 = 100;

    /// Build a request; duplicate field names are dropped keeping first occurrence.
    pub fn new(fields: Vec<String>, filters: Vec<QueryFilter>, limit: i64) -> Result<Self, FetchError> {
        if limit < 1 {
            return Err(FetchError::InvalidLimit(format!("Limit must be positive, got {}", limit)));
        }
        let mut unique: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            let field = field.trim().to_string();
            if !field.is_empty() && !unique.contains(&field) {
                unique.push(field);
            }
        }
        Ok(Self { fields: unique, filters, limit })
    }

    /// Comma separated `fields` parameter, e.g. `id,name,adGroup.status`
    pub fn split_fields(fields: Option<&str>) -> Vec<String> {
        fields
            .map(|s| s.split(',').map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// One primary object and the related objects from its group of join rows
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<P, R> {
    pub primary: P,
    pub related: Vec<R>,
}

/// Campaign-primary fetch result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    pub campaign: Campaign,
    pub ad_groups: Vec<AdGroup>,
}

impl From<Grouped<Campaign, AdGroup>> for FetchResult {
    fn from(group: Grouped<Campaign, AdGroup>) -> Self {
        Self { campaign: group.primary, ad_groups: group.related }
    }
}

/// Rendered SQL plus its positional bind values
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}
