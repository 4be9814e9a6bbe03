use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::ports::OrderRepository;
use crate::domain::order::ports::OrderServicePort;

pub struct OrderService<OR>
where
    OR: OrderRepository,
{
    repository: Arc<OR>,
}

impl<OR> OrderService<OR>
where
    OR: OrderRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<OR> OrderServicePort for OrderService<OR>
where
    OR: OrderRepository,
{
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.repository.list().await?)
    }

    async fn create_order(&self, command: CreateOrderCommand) -> Result<Order, OrderError> {
        let new_order = NewOrder::try_from(command)?;

        let order = self
            .repository
            .create(new_order)
            .await
            .map_err(|e| match e {
                StoreError::Empty => OrderError::CreateFailed("no data returned".to_string()),
                other => OrderError::Store(other),
            })?;

        tracing::info!(order_id = %order.id, user_id = %order.user_id, "Order created");

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::order::models::OrderId;

    mock! {
        pub TestOrderRepository {}

        #[async_trait]
        impl OrderRepository for TestOrderRepository {
            async fn list(&self) -> Result<Vec<Order>, StoreError>;
            async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;
        }
    }

    fn command() -> CreateOrderCommand {
        CreateOrderCommand {
            user_id: Some("u-1".to_string()),
            total_amount: Some(42.0),
            delivery_address: Some("12 Market Road".to_string()),
            ..Default::default()
        }
    }

    fn stored(order: NewOrder) -> Order {
        Order {
            id: OrderId::Numeric(1),
            user_id: order.user_id,
            total_amount: order.total_amount,
            delivery_address: order.delivery_address,
            phone: order.phone,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            notes: order.notes,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let mut repository = MockTestOrderRepository::new();

        repository
            .expect_create()
            .withf(|order| {
                order.user_id == "u-1"
                    && order.payment_method == "cash_on_delivery"
                    && order.payment_status == "pending"
            })
            .times(1)
            .returning(|order| Ok(stored(order)));

        let service = OrderService::new(Arc::new(repository));

        let order = service.create_order(command()).await.unwrap();
        assert_eq!(order.id, OrderId::Numeric(1));
        assert_eq!(order.total_amount, 42.0);
    }

    #[tokio::test]
    async fn test_create_order_missing_field_skips_store() {
        let mut repository = MockTestOrderRepository::new();
        repository.expect_create().times(0);

        let service = OrderService::new(Arc::new(repository));

        let result = service
            .create_order(CreateOrderCommand {
                total_amount: None,
                ..command()
            })
            .await;
        assert!(matches!(result, Err(OrderError::MissingField("total_amount"))));
    }

    #[tokio::test]
    async fn test_create_order_empty_response() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_create()
            .returning(|_| Err(StoreError::Empty));

        let service = OrderService::new(Arc::new(repository));

        let result = service.create_order(command()).await;
        assert!(matches!(result, Err(OrderError::CreateFailed(_))));
    }

    #[tokio::test]
    async fn test_list_orders_store_failure() {
        let mut repository = MockTestOrderRepository::new();
        repository
            .expect_list()
            .returning(|| Err(StoreError::Timeout));

        let service = OrderService::new(Arc::new(repository));

        let result = service.list_orders().await;
        assert!(matches!(result, Err(OrderError::Store(StoreError::Timeout))));
    }
}
