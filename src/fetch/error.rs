use thiserror::Error;

use crate::database::manager::DatabaseError;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Invalid filters: {0}")]
    InvalidFilters(#[from] serde_json::Error),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Fetch execution failed: {0}")]
    Execution(#[from] DatabaseError),
}
