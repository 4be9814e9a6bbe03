use thiserror::Error;

use crate::domain::errors::StoreError;

#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),

    #[error("Failed to create order: {0}")]
    CreateFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
