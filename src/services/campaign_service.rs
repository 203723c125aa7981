use sqlx::PgPool;
use tracing::info;

use super::error::{require_name, ServiceError};
use crate::database::models::{Campaign, CampaignUpdate, NewCampaign};
use crate::database::repository::CampaignRepository;

const ENTITY: &str = "Campaign";

#[derive(Clone)]
pub struct CampaignService {
    repository: CampaignRepository,
}

impl CampaignService {
    pub fn new(pool: PgPool) -> Self {
        Self { repository: CampaignRepository::new(pool) }
    }

    pub async fn create(&self, new: NewCampaign) -> Result<Campaign, ServiceError> {
        require_name(&new.name)?;
        let campaign = self.repository.create(&new).await?;
        info!("Created campaign {:?} ({})", campaign.id, new.name);
        Ok(campaign)
    }

    pub async fn get(&self, id: i64) -> Result<Campaign, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })
    }

    pub async fn update(&self, id: i64, update: CampaignUpdate) -> Result<Campaign, ServiceError> {
        require_name(&update.name)?;
        let campaign = self
            .repository
            .update(id, &update)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        info!("Updated campaign {}", id);
        Ok(campaign)
    }

    pub async fn delete(&self, id: i64) -> Result<Campaign, ServiceError> {
        let campaign = self
            .repository
            .delete_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        info!("Marked campaign {} deleted", id);
        Ok(campaign)
    }
}
