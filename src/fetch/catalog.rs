//! Static per-entity field catalogs.
//!
//! Each catalog maps the logical field names callers use (`ksName`,
//! `campaignId`) to a physical column and a pure applier that copies a raw
//! column value onto a partially built entity. Catalog order is the
//! projection order.

use std::fmt;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::database::models::{AdGroup, Campaign};
use crate::types::{EntityKind, Status, Table};

/// Logical name of the identity field in every catalog
pub const ID_FIELD: &str = "id";

/// Text form of timestamp values in raw rows and in filter comparisons
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Postgres `to_char` pattern producing the same text as [`TIMESTAMP_FORMAT`]
pub const PG_TIMESTAMP_FORMAT: &str = "YYYY-MM-DD\"T\"HH24:MI:SS.US";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    BigInt,
    Text,
    Timestamp,
}

/// Physical column reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: Table,
    pub name: &'static str,
    pub kind: ColumnType,
}

impl Column {
    pub const fn new(table: Table, name: &'static str, kind: ColumnType) -> Self {
        Self { table, name, kind }
    }

    /// `"ad_group"."status"`
    pub fn qualified(&self) -> String {
        format!("\"{}\".\"{}\"", self.table.name(), self.name)
    }

    /// Result-set alias that stays unique across both joined tables
    pub fn alias(&self) -> String {
        format!("{}__{}", self.table.name(), self.name)
    }
}

/// (logical name, column, applier) triple
pub struct FieldDescriptor<E> {
    pub name: &'static str,
    pub column: Column,
    pub apply: fn(E, &Value) -> E,
}

impl<E> fmt::Debug for FieldDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("column", &self.column.qualified())
            .finish()
    }
}

/// Entities that have a catalog
pub trait Entity: Default + Sized + 'static {
    const KIND: EntityKind;

    fn catalog() -> &'static [FieldDescriptor<Self>];
}

/// Resolve logical names against the catalog of `E`.
/// Unknown names are dropped; the identity field is always present; output
/// follows catalog order.
pub fn resolve<E: Entity>(names: &[String]) -> Vec<&'static FieldDescriptor<E>> {
    E::catalog()
        .iter()
        .filter(|field| field.name == ID_FIELD || names.iter().any(|n| n == field.name))
        .collect()
}

impl EntityKind {
    /// Column behind a logical field name of this entity, if any
    pub fn column_for(&self, name: &str) -> Option<Column> {
        match self {
            EntityKind::Campaign => find_column(Campaign::catalog(), name),
            EntityKind::AdGroup => find_column(AdGroup::catalog(), name),
        }
    }

    /// Column behind the identity field
    pub fn id_column(&self) -> Column {
        match self {
            EntityKind::Campaign => columns::CAMPAIGN_ID,
            EntityKind::AdGroup => columns::AD_GROUP_ID,
        }
    }

    /// Every logical field name of this entity, in catalog order
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            EntityKind::Campaign => Campaign::catalog().iter().map(|f| f.name).collect(),
            EntityKind::AdGroup => AdGroup::catalog().iter().map(|f| f.name).collect(),
        }
    }
}

fn find_column<E>(catalog: &'static [FieldDescriptor<E>], name: &str) -> Option<Column> {
    catalog.iter().find(|field| field.name == name).map(|field| field.column)
}

pub mod columns {
    use super::{Column, ColumnType};
    use crate::types::Table;

    pub const CAMPAIGN_ID: Column = Column::new(Table::Campaign, "id", ColumnType::BigInt);
    pub const CAMPAIGN_NAME: Column = Column::new(Table::Campaign, "name", ColumnType::Text);
    pub const CAMPAIGN_KS_NAME: Column = Column::new(Table::Campaign, "ks_name", ColumnType::Text);
    pub const CAMPAIGN_STATUS: Column = Column::new(Table::Campaign, "status", ColumnType::Text);
    pub const CAMPAIGN_CREATE_DATE: Column = Column::new(Table::Campaign, "create_date", ColumnType::Timestamp);
    pub const CAMPAIGN_LAST_UPDATED: Column = Column::new(Table::Campaign, "last_updated", ColumnType::Timestamp);

    pub const AD_GROUP_ID: Column = Column::new(Table::AdGroup, "id", ColumnType::BigInt);
    pub const AD_GROUP_CAMPAIGN_ID: Column = Column::new(Table::AdGroup, "campaign_id", ColumnType::BigInt);
    pub const AD_GROUP_NAME: Column = Column::new(Table::AdGroup, "name", ColumnType::Text);
    pub const AD_GROUP_STATUS: Column = Column::new(Table::AdGroup, "status", ColumnType::Text);
    pub const AD_GROUP_CREATE_DATE: Column = Column::new(Table::AdGroup, "create_date", ColumnType::Timestamp);
    pub const AD_GROUP_LAST_UPDATED: Column = Column::new(Table::AdGroup, "last_updated", ColumnType::Timestamp);
}

static CAMPAIGN_FIELDS: [FieldDescriptor<Campaign>; 6] = [
    FieldDescriptor { name: ID_FIELD, column: columns::CAMPAIGN_ID, apply: campaign_id },
    FieldDescriptor { name: "name", column: columns::CAMPAIGN_NAME, apply: campaign_name },
    FieldDescriptor { name: "ksName", column: columns::CAMPAIGN_KS_NAME, apply: campaign_ks_name },
    FieldDescriptor { name: "status", column: columns::CAMPAIGN_STATUS, apply: campaign_status },
    FieldDescriptor { name: "createDate", column: columns::CAMPAIGN_CREATE_DATE, apply: campaign_create_date },
    FieldDescriptor { name: "lastUpdated", column: columns::CAMPAIGN_LAST_UPDATED, apply: campaign_last_updated },
];

static AD_GROUP_FIELDS: [FieldDescriptor<AdGroup>; 6] = [
    FieldDescriptor { name: ID_FIELD, column: columns::AD_GROUP_ID, apply: ad_group_id },
    FieldDescriptor { name: "campaignId", column: columns::AD_GROUP_CAMPAIGN_ID, apply: ad_group_campaign_id },
    FieldDescriptor { name: "name", column: columns::AD_GROUP_NAME, apply: ad_group_name },
    FieldDescriptor { name: "status", column: columns::AD_GROUP_STATUS, apply: ad_group_status },
    FieldDescriptor { name: "createDate", column: columns::AD_GROUP_CREATE_DATE, apply: ad_group_create_date },
    FieldDescriptor { name: "lastUpdated", column: columns::AD_GROUP_LAST_UPDATED, apply: ad_group_last_updated },
];

impl Entity for Campaign {
    const KIND: EntityKind = EntityKind::Campaign;

    fn catalog() -> &'static [FieldDescriptor<Self>] {
        &CAMPAIGN_FIELDS
    }
}

impl Entity for AdGroup {
    const KIND: EntityKind = EntityKind::AdGroup;

    fn catalog() -> &'static [FieldDescriptor<Self>] {
        &AD_GROUP_FIELDS
    }
}

// Raw value decoding shared by the appliers. Null or undecodable values leave the field unset.

pub fn value_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn value_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn value_status(value: &Value) -> Option<Status> {
    let status: Option<Status> = value.as_str()?.parse().ok();
    if status.is_none() {
        tracing::warn!("Ignoring unrecognised status value: {}", value);
    }
    status
}

fn value_timestamp(value: &Value) -> Option<NaiveDateTime> {
    value
        .as_str()
        .and_then(|s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok())
}

fn campaign_id(c: Campaign, v: &Value) -> Campaign {
    Campaign { id: value_i64(v), ..c }
}

fn campaign_name(c: Campaign, v: &Value) -> Campaign {
    Campaign { name: value_string(v), ..c }
}

fn campaign_ks_name(c: Campaign, v: &Value) -> Campaign {
    Campaign { ks_name: value_string(v), ..c }
}

fn campaign_status(c: Campaign, v: &Value) -> Campaign {
    Campaign { status: value_status(v), ..c }
}

fn campaign_create_date(c: Campaign, v: &Value) -> Campaign {
    Campaign { create_date: value_timestamp(v), ..c }
}

fn campaign_last_updated(c: Campaign, v: &Value) -> Campaign {
    Campaign { last_updated: value_timestamp(v), ..c }
}

fn ad_group_id(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { id: value_i64(v), ..a }
}

fn ad_group_campaign_id(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { campaign_id: value_i64(v), ..a }
}

fn ad_group_name(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { name: value_string(v), ..a }
}

fn ad_group_status(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { status: value_status(v), ..a }
}

fn ad_group_create_date(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { create_date: value_timestamp(v), ..a }
}

fn ad_group_last_updated(a: AdGroup, v: &Value) -> AdGroup {
    AdGroup { last_updated: value_timestamp(v), ..a }
}
