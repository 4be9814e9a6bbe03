use async_trait::async_trait;

use crate::domain::errors::StoreError;

/// Connectivity check against the external store.
#[async_trait]
pub trait StoreProbe: Send + Sync + 'static {
    /// Issue the cheapest possible round trip to the store.
    ///
    /// # Errors
    /// * `StoreError` - The store could not be reached or rejected the query
    async fn ping(&self) -> Result<(), StoreError>;
}
