use sqlx::PgPool;
use tracing::info;

use super::error::{require_name, ServiceError};
use crate::database::models::{AdGroup, AdGroupUpdate, NewAdGroup};
use crate::database::repository::{AdGroupRepository, CampaignRepository};

const ENTITY: &str = "AdGroup";

#[derive(Clone)]
pub struct AdGroupService {
    repository: AdGroupRepository,
    campaigns: CampaignRepository,
}

impl AdGroupService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AdGroupRepository::new(pool.clone()),
            campaigns: CampaignRepository::new(pool),
        }
    }

    /// The owning campaign must already exist
    pub async fn create(&self, new: NewAdGroup) -> Result<AdGroup, ServiceError> {
        require_name(&new.name)?;
        if self.campaigns.find_by_id(new.campaign_id).await?.is_none() {
            return Err(ServiceError::MissingReference { field: "campaign_id" });
        }
        let ad_group = self.repository.create(&new).await?;
        info!("Created ad group {:?} under campaign {}", ad_group.id, new.campaign_id);
        Ok(ad_group)
    }

    pub async fn get(&self, id: i64) -> Result<AdGroup, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })
    }

    pub async fn update(&self, id: i64, update: AdGroupUpdate) -> Result<AdGroup, ServiceError> {
        require_name(&update.name)?;
        let ad_group = self
            .repository
            .update(id, &update)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        info!("Updated ad group {}", id);
        Ok(ad_group)
    }

    pub async fn delete(&self, id: i64) -> Result<AdGroup, ServiceError> {
        let ad_group = self
            .repository
            .delete_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        info!("Marked ad group {} deleted", id);
        Ok(ad_group)
    }

    pub async fn find_not_deleted_by_ks_name(&self, ks_name: &str) -> Result<Vec<AdGroup>, ServiceError> {
        let ad_groups = self.repository.fetch_not_deleted_by_ks_name(ks_name).await?;
        info!("Found {} live ad groups for ks_name {}", ad_groups.len(), ks_name);
        Ok(ad_groups)
    }
}
