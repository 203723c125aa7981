use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::campaign::Campaign;
use crate::types::Status;

/// Ad group row. Like [`Campaign`], fields stay `None` unless requested.
/// `campaign` is only filled by the ad-group-primary fetch direction and
/// by the ks_name lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<Box<Campaign>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl<'r> FromRow<'r, PgRow> for AdGroup {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: Some(row.try_get("id")?),
            campaign_id: Some(row.try_get("campaign_id")?),
            campaign: None,
            name: row.try_get("name")?,
            status: Some(status.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: e.into(),
            })?),
            create_date: row.try_get("create_date")?,
            last_updated: row.try_get("last_updated")?,
        })
    }
}

/// Body of POST /api/v1/ad_group
#[derive(Debug, Clone, Deserialize)]
pub struct NewAdGroup {
    pub campaign_id: i64,
    pub name: String,
    #[serde(default = "default_status")]
    pub status: Status,
}

/// Body of PUT /api/v1/ad_group/:id. The owning campaign cannot be changed.
#[derive(Debug, Clone, Deserialize)]
pub struct AdGroupUpdate {
    pub name: String,
    pub status: Status,
}

fn default_status() -> Status {
    Status::Active
}
