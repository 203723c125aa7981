use crate::database::manager::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Referenced record does not exist: {field}")]
    MissingReference { field: &'static str },

    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

pub(crate) fn require_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidField { field: "name", message: "must not be blank".to_string() });
    }
    Ok(())
}
