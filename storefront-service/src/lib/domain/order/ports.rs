use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;

/// Port for order service operations.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    /// Every stored order.
    ///
    /// # Errors
    /// * `Store` - The order table could not be read
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError>;

    /// Validate and record a new order.
    ///
    /// # Errors
    /// * `MissingField` - A required field is absent or empty
    /// * `CreateFailed` - The store returned nothing for the insert
    /// * `Store` - The insert could not be performed
    async fn create_order(&self, command: CreateOrderCommand) -> Result<Order, OrderError>;
}

/// Access to the `orders` collection.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Insert and return the stored row.
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;
}
