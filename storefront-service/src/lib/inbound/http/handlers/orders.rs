use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::inbound::http::router::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    let orders = state.order_service.list_orders().await?;

    Ok(ApiSuccess::list(
        StatusCode::OK,
        orders.iter().map(OrderData::from).collect(),
    ))
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    state
        .order_service
        .create_order(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref order| {
            ApiSuccess::new(StatusCode::CREATED, order.into())
                .with_message("Order created successfully")
        })
}

/// Static description of the order routes.
pub async fn orders_test() -> Json<OrdersTestResponse> {
    Json(OrdersTestResponse {
        success: true,
        message: "Orders endpoint is working!".to_string(),
        routes: vec![
            "GET /api/orders/ - Get all orders".to_string(),
            "POST /api/orders/ - Create new order".to_string(),
            "GET /api/orders/test - This test endpoint".to_string(),
        ],
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrdersTestResponse {
    pub success: bool,
    pub message: String,
    pub routes: Vec<String>,
}

/// HTTP request body for order creation (raw JSON)
///
/// `user_id` may be sent as a string or a number, `total_amount` as a number
/// or a numeric string.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    total_amount: Option<Value>,
    #[serde(default)]
    delivery_address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl CreateOrderRequest {
    fn try_into_command(self) -> Result<CreateOrderCommand, OrderError> {
        let user_id = match self.user_id {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id),
            Some(Value::Number(id)) => Some(id.to_string()),
            Some(_) => return Err(OrderError::InvalidField("user_id")),
        };

        let total_amount = match self.total_amount {
            None | Some(Value::Null) => None,
            Some(Value::Number(amount)) => amount.as_f64(),
            Some(Value::String(amount)) if amount.trim().is_empty() => None,
            Some(Value::String(amount)) => Some(
                amount
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| OrderError::InvalidField("total_amount"))?,
            ),
            Some(_) => return Err(OrderError::InvalidField("total_amount")),
        };

        Ok(CreateOrderCommand {
            user_id,
            total_amount,
            delivery_address: self.delivery_address,
            phone: self.phone,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderData {
    pub id: OrderId,
    pub user_id: String,
    pub total_amount: f64,
    pub delivery_address: String,
    pub phone: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            user_id: order.user_id.clone(),
            total_amount: order.total_amount,
            delivery_address: order.delivery_address.clone(),
            phone: order.phone.clone(),
            payment_method: order.payment_method.clone(),
            payment_status: order.payment_status.clone(),
            notes: order.notes.clone(),
            created_at: order.created_at,
        }
    }
}
