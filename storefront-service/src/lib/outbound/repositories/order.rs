use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::id_string;
use super::lenient_timestamp;
use crate::domain::errors::StoreError;
use crate::domain::order::models::NewOrder;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::DEFAULT_PAYMENT_METHOD;
use crate::domain::order::models::DEFAULT_PAYMENT_STATUS;
use crate::domain::order::ports::OrderRepository;
use crate::outbound::store_client::StoreQuery;
use crate::outbound::store_client::SupabaseClient;

const TABLE: &str = "orders";

pub struct SupabaseOrderRepository {
    client: SupabaseClient,
}

impl SupabaseOrderRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for SupabaseOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> = self
            .client
            .select(TABLE, &StoreQuery::new().select("*"))
            .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let row: OrderRow = self.client.insert(TABLE, &order_payload(&order)).await?;
        Ok(row.into())
    }
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    id: OrderId,
    #[serde(deserialize_with = "id_string")]
    user_id: String,
    total_amount: f64,
    delivery_address: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            total_amount: row.total_amount,
            delivery_address: row.delivery_address,
            phone: row.phone,
            payment_method: row
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            payment_status: row
                .payment_status
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            notes: row.notes.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertOrderRow<'a> {
    user_id: &'a str,
    total_amount: f64,
    delivery_address: &'a str,
    phone: Option<&'a str>,
    payment_method: &'a str,
    payment_status: &'a str,
    notes: &'a str,
}

fn order_payload(order: &NewOrder) -> InsertOrderRow<'_> {
    InsertOrderRow {
        user_id: &order.user_id,
        total_amount: order.total_amount,
        delivery_address: &order.delivery_address,
        phone: order.phone.as_deref(),
        payment_method: &order.payment_method,
        payment_status: &order.payment_status,
        notes: &order.notes,
    }
}
