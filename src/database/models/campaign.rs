use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::types::Status;

/// Campaign row. Every field is optional because the fetch engine only
/// populates what the caller asked for; unset fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ks_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl<'r> FromRow<'r, PgRow> for Campaign {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(Self {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            ks_name: row.try_get("ks_name")?,
            status: Some(status.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: e.into(),
            })?),
            create_date: row.try_get("create_date")?,
            last_updated: row.try_get("last_updated")?,
        })
    }
}

/// Body of POST /api/v1/campaign
#[derive(Debug, Clone, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub ks_name: Option<String>,
    #[serde(default = "default_status")]
    pub status: Status,
}

/// Body of PUT /api/v1/campaign/:id
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignUpdate {
    pub name: String,
    pub ks_name: Option<String>,
    pub status: Status,
}

fn default_status() -> Status {
    Status::Active
}
