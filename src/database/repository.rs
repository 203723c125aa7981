use std::collections::HashMap;

use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{AdGroup, AdGroupUpdate, Campaign, CampaignUpdate, NewAdGroup, NewCampaign};
use crate::types::Status;

const CAMPAIGN_COLUMNS: &str = "id, name, ks_name, status, create_date, last_updated";
const AD_GROUP_COLUMNS: &str = "id, campaign_id, name, status, create_date, last_updated";

/// Row-level access to the campaign table
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewCampaign) -> Result<Campaign, DatabaseError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "INSERT INTO campaign (name, ks_name, status) VALUES ($1, $2, $3) RETURNING {}",
            CAMPAIGN_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.ks_name)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, DatabaseError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {} FROM campaign WHERE id = $1",
            CAMPAIGN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Campaign>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {} FROM campaign WHERE id = ANY($1) ORDER BY id",
            CAMPAIGN_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    pub async fn update(&self, id: i64, update: &CampaignUpdate) -> Result<Option<Campaign>, DatabaseError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "UPDATE campaign SET name = $1, ks_name = $2, status = $3, last_updated = now() \
             WHERE id = $4 RETURNING {}",
            CAMPAIGN_COLUMNS
        ))
        .bind(&update.name)
        .bind(&update.ks_name)
        .bind(update.status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    /// Soft delete: the row stays, marked DELETED
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<Campaign>, DatabaseError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "UPDATE campaign SET status = $1, last_updated = now() WHERE id = $2 RETURNING {}",
            CAMPAIGN_COLUMNS
        ))
        .bind(Status::Deleted.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }
}

/// Row-level access to the ad_group table
#[derive(Clone)]
pub struct AdGroupRepository {
    pool: PgPool,
}

impl AdGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewAdGroup) -> Result<AdGroup, DatabaseError> {
        let ad_group = sqlx::query_as::<_, AdGroup>(&format!(
            "INSERT INTO ad_group (campaign_id, name, status) VALUES ($1, $2, $3) RETURNING {}",
            AD_GROUP_COLUMNS
        ))
        .bind(new.campaign_id)
        .bind(&new.name)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(ad_group)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<AdGroup>, DatabaseError> {
        let ad_group = sqlx::query_as::<_, AdGroup>(&format!(
            "SELECT {} FROM ad_group WHERE id = $1",
            AD_GROUP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ad_group)
    }

    pub async fn update(&self, id: i64, update: &AdGroupUpdate) -> Result<Option<AdGroup>, DatabaseError> {
        let ad_group = sqlx::query_as::<_, AdGroup>(&format!(
            "UPDATE ad_group SET name = $1, status = $2, last_updated = now() WHERE id = $3 RETURNING {}",
            AD_GROUP_COLUMNS
        ))
        .bind(&update.name)
        .bind(update.status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ad_group)
    }

    /// Soft delete: the row stays, marked DELETED
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<AdGroup>, DatabaseError> {
        let ad_group = sqlx::query_as::<_, AdGroup>(&format!(
            "UPDATE ad_group SET status = $1, last_updated = now() WHERE id = $2 RETURNING {}",
            AD_GROUP_COLUMNS
        ))
        .bind(Status::Deleted.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ad_group)
    }

    /// Live ad groups of live campaigns carrying `ks_name`, each with its campaign attached
    pub async fn fetch_not_deleted_by_ks_name(&self, ks_name: &str) -> Result<Vec<AdGroup>, DatabaseError> {
        let deleted = Status::Deleted.as_str();
        let ad_groups = sqlx::query_as::<_, AdGroup>(
            "SELECT ag.id, ag.campaign_id, ag.name, ag.status, ag.create_date, ag.last_updated \
             FROM ad_group ag INNER JOIN campaign c ON ag.campaign_id = c.id \
             WHERE c.ks_name = $1 AND c.status <> $2 AND ag.status <> $2 \
             ORDER BY ag.id",
        )
        .bind(ks_name)
        .bind(deleted)
        .fetch_all(&self.pool)
        .await?;

        let mut campaign_ids: Vec<i64> = ad_groups.iter().filter_map(|a| a.campaign_id).collect();
        campaign_ids.sort_unstable();
        campaign_ids.dedup();

        let campaigns: HashMap<i64, Campaign> = CampaignRepository::new(self.pool.clone())
            .find_by_ids(&campaign_ids)
            .await?
            .into_iter()
            .filter_map(|c| c.id.map(|id| (id, c)))
            .collect();

        Ok(ad_groups
            .into_iter()
            .map(|ad_group| AdGroup {
                campaign: ad_group
                    .campaign_id
                    .and_then(|id| campaigns.get(&id))
                    .cloned()
                    .map(Box::new),
                ..ad_group
            })
            .collect())
    }
}
