use auth::PasswordError;
use thiserror::Error;

use crate::domain::errors::StoreError;

/// Error for credential input validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Email and password are required")]
    Missing,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    MissingCredentials(#[from] CredentialsError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User already exists")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    // Infrastructure errors
    #[error("Failed to create user: {0}")]
    CreateFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
