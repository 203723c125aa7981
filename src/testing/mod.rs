//! Test doubles for the fetch engine and handlers

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;
use crate::database::models::{AdGroup, Campaign};
use crate::fetch::catalog::{columns, Column, TIMESTAMP_FORMAT};
use crate::fetch::executor::{JoinQuery, JoinStore, JoinType, RawRow};
use crate::types::{EntityKind, Status};

/// Join store over in-memory tables.
///
/// Performs the LEFT / INNER join in process, evaluates the query condition
/// against every joined row and keeps only the projected columns, ordered
/// the way the SQL ORDER BY would order them.
#[derive(Debug, Default)]
pub struct MemoryJoinStore {
    campaigns: Vec<Campaign>,
    ad_groups: Vec<AdGroup>,
    queries: AtomicUsize,
}

impl MemoryJoinStore {
    pub fn new(campaigns: Vec<Campaign>, ad_groups: Vec<AdGroup>) -> Self {
        Self { campaigns, ad_groups, queries: AtomicUsize::new(0) }
    }

    /// Number of joins executed so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn joined_rows(&self, query: &JoinQuery) -> Vec<RawRow> {
        let mut rows = Vec::new();
        match query.primary {
            EntityKind::Campaign => {
                for campaign in &self.campaigns {
                    let children: Vec<&AdGroup> = self
                        .ad_groups
                        .iter()
                        .filter(|a| a.campaign_id.is_some() && a.campaign_id == campaign.id)
                        .collect();
                    if children.is_empty() && query.join == JoinType::Left {
                        rows.push(campaign_row(campaign, RawRow::default()));
                    }
                    for ad_group in children {
                        rows.push(campaign_row(campaign, ad_group_row(ad_group, RawRow::default())));
                    }
                }
            }
            EntityKind::AdGroup => {
                for ad_group in &self.ad_groups {
                    let parent = self.campaigns.iter().find(|c| c.id.is_some() && c.id == ad_group.campaign_id);
                    match parent {
                        Some(campaign) => rows.push(ad_group_row(ad_group, campaign_row(campaign, RawRow::default()))),
                        None if query.join == JoinType::Left => rows.push(ad_group_row(ad_group, RawRow::default())),
                        None => {}
                    }
                }
            }
        }

        let primary_id = query.primary.id_column();
        let related_id = query.related().id_column();
        rows.sort_by_key(|row| (sort_key(row, &primary_id), sort_key(row, &related_id)));
        rows
    }
}

#[async_trait]
impl JoinStore for MemoryJoinStore {
    async fn fetch_rows(&self, query: &JoinQuery) -> Result<Vec<RawRow>, DatabaseError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .joined_rows(query)
            .into_iter()
            .filter(|row| query.condition.as_ref().map(|c| c.matches(row)).unwrap_or(true))
            .map(|row| project(&row, &query.projection))
            .collect())
    }
}

/// Join store whose every call fails, for error-path tests
#[derive(Debug, Default)]
pub struct FailingJoinStore;

#[async_trait]
impl JoinStore for FailingJoinStore {
    async fn fetch_rows(&self, _query: &JoinQuery) -> Result<Vec<RawRow>, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset by peer".to_string()))
    }
}

// Nulls sort last, as in PostgreSQL ascending order
fn sort_key(row: &RawRow, column: &Column) -> (bool, i64) {
    match row.get(column).as_i64() {
        Some(id) => (false, id),
        None => (true, 0),
    }
}

fn project(row: &RawRow, projection: &[Column]) -> RawRow {
    projection
        .iter()
        .fold(RawRow::default(), |out, column| out.with(*column, row.get(column).clone()))
}

fn campaign_row(campaign: &Campaign, row: RawRow) -> RawRow {
    row.with(columns::CAMPAIGN_ID, json!(campaign.id))
        .with(columns::CAMPAIGN_NAME, json!(campaign.name))
        .with(columns::CAMPAIGN_KS_NAME, json!(campaign.ks_name))
        .with(columns::CAMPAIGN_STATUS, json!(campaign.status.map(|s| s.as_str())))
        .with(columns::CAMPAIGN_CREATE_DATE, timestamp(campaign.create_date))
        .with(columns::CAMPAIGN_LAST_UPDATED, timestamp(campaign.last_updated))
}

fn ad_group_row(ad_group: &AdGroup, row: RawRow) -> RawRow {
    row.with(columns::AD_GROUP_ID, json!(ad_group.id))
        .with(columns::AD_GROUP_CAMPAIGN_ID, json!(ad_group.campaign_id))
        .with(columns::AD_GROUP_NAME, json!(ad_group.name))
        .with(columns::AD_GROUP_STATUS, json!(ad_group.status.map(|s| s.as_str())))
        .with(columns::AD_GROUP_CREATE_DATE, timestamp(ad_group.create_date))
        .with(columns::AD_GROUP_LAST_UPDATED, timestamp(ad_group.last_updated))
}

fn timestamp(value: Option<NaiveDateTime>) -> Value {
    value
        .map(|ts| Value::String(ts.format(TIMESTAMP_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

fn fixture_time() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 15).and_then(|d| d.and_hms_opt(9, 30, 0))
}

/// Fully populated campaign fixture
pub fn campaign(id: i64, name: &str, ks_name: &str, status: Status) -> Campaign {
    Campaign {
        id: Some(id),
        name: Some(name.to_string()),
        ks_name: Some(ks_name.to_string()),
        status: Some(status),
        create_date: fixture_time(),
        last_updated: fixture_time(),
    }
}

/// Fully populated ad group fixture
pub fn ad_group(id: i64, campaign_id: i64, name: &str, status: Status) -> AdGroup {
    AdGroup {
        id: Some(id),
        campaign_id: Some(campaign_id),
        campaign: None,
        name: Some(name.to_string()),
        status: Some(status),
        create_date: fixture_time(),
        last_updated: fixture_time(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::condition::Condition;

    #[tokio::test]
    async fn left_join_keeps_childless_campaigns_with_null_related_columns() {
        let store = MemoryJoinStore::new(vec![campaign(1, "c", "ks", Status::Active)], vec![]);
        let query = JoinQuery::new(
            EntityKind::Campaign,
            vec![columns::CAMPAIGN_ID],
            vec![columns::AD_GROUP_ID],
            None,
            None,
        );

        let rows = store.fetch_rows(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(&columns::AD_GROUP_ID), &Value::Null);
        assert_eq!(rows[0].get(&columns::CAMPAIGN_NAME), &Value::Null);
    }

    #[tokio::test]
    async fn condition_and_timestamps_follow_sql_semantics() {
        let store = MemoryJoinStore::new(
            vec![campaign(1, "c", "ks", Status::Active)],
            vec![ad_group(2, 1, "a", Status::Paused), ad_group(3, 1, "b", Status::Active)],
        );
        let query = JoinQuery::new(
            EntityKind::AdGroup,
            vec![columns::AD_GROUP_ID, columns::AD_GROUP_CREATE_DATE],
            vec![columns::CAMPAIGN_ID],
            Some(Condition::equals_ignore_case(columns::AD_GROUP_STATUS, "paused")),
            None,
        );

        let rows = store.fetch_rows(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(&columns::AD_GROUP_ID), &json!(2));
        assert_eq!(rows[0].get(&columns::AD_GROUP_CREATE_DATE), &json!("2024-01-15T09:30:00.000000"));
        assert_eq!(store.query_count(), 1);
    }
}
