use thiserror::Error;

use crate::domain::errors::StoreError;

#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
