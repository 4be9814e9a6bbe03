use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Structurally invalid, unsigned, signed with another key, or altered.
    #[error("Invalid token: {0}")]
    Malformed(String),

    /// Signature is valid but `exp` has passed.
    #[error("Token has expired")]
    Expired,
}
