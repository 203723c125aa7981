pub mod ad_group;
pub mod campaign;

pub use ad_group::{AdGroup, AdGroupUpdate, NewAdGroup};
pub use campaign::{Campaign, CampaignUpdate, NewCampaign};
