use thiserror::Error;

/// Failure of a call to the external store.
///
/// Every repository port returns this, so each caller has to decide what a
/// failed dependency means for its own operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("External store request timed out")]
    Timeout,

    #[error("External store unreachable: {0}")]
    Unavailable(String),

    #[error("External store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected external store response: {0}")]
    Decode(String),

    #[error("External store returned no rows")]
    Empty,
}
