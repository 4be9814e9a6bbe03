use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a mismatch or an unparseable stored
/// hash is simply `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
