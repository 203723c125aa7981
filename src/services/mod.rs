pub mod ad_group_service;
pub mod campaign_service;
pub mod error;

pub use ad_group_service::AdGroupService;
pub use campaign_service::CampaignService;
pub use error::ServiceError;
