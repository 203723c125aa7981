pub mod join_store;
pub mod manager;
pub mod models;
pub mod repository;

pub use join_store::PgJoinStore;
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{AdGroupRepository, CampaignRepository};
