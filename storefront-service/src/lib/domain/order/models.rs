use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::order::errors::OrderError;

pub const DEFAULT_PAYMENT_METHOD: &str = "cash_on_delivery";
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// Order as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
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

/// Store-assigned order identifier, numeric or textual depending on the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => id.fmt(f),
            Self::Text(id) => id.fmt(f),
        }
    }
}

/// Raw order fields as submitted by a caller.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    pub user_id: Option<String>,
    pub total_amount: Option<f64>,
    pub delivery_address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
}

/// Validated order ready to be inserted, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub total_amount: f64,
    pub delivery_address: String,
    pub phone: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub notes: String,
}

impl TryFrom<CreateOrderCommand> for NewOrder {
    type Error = OrderError;

    /// Required fields are checked in order `user_id`, `total_amount`,
    /// `delivery_address`; empty strings and a zero amount count as missing.
    fn try_from(command: CreateOrderCommand) -> Result<Self, Self::Error> {
        let user_id = command
            .user_id
            .filter(|v| !v.is_empty())
            .ok_or(OrderError::MissingField("user_id"))?;

        let total_amount = command
            .total_amount
            .filter(|v| *v != 0.0)
            .ok_or(OrderError::MissingField("total_amount"))?;

        let delivery_address = command
            .delivery_address
            .filter(|v| !v.is_empty())
            .ok_or(OrderError::MissingField("delivery_address"))?;

        Ok(Self {
            user_id,
            total_amount,
            delivery_address,
            phone: command.phone,
            payment_method: command
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            payment_status: command
                .payment_status
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            notes: command.notes.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> CreateOrderCommand {
        CreateOrderCommand {
            user_id: Some("u-1".to_string()),
            total_amount: Some(120.5),
            delivery_address: Some("12 Market Road".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_order_defaults() {
        let order = NewOrder::try_from(complete()).unwrap();

        assert_eq!(order.payment_method, "cash_on_delivery");
        assert_eq!(order.payment_status, "pending");
        assert_eq!(order.notes, "");
        assert_eq!(order.phone, None);
    }

    #[test]
    fn test_new_order_keeps_supplied_values() {
        let order = NewOrder::try_from(CreateOrderCommand {
            phone: Some("555-0100".to_string()),
            payment_method: Some("upi".to_string()),
            payment_status: Some("paid".to_string()),
            notes: Some("ring twice".to_string()),
            ..complete()
        })
        .unwrap();

        assert_eq!(order.phone.as_deref(), Some("555-0100"));
        assert_eq!(order.payment_method, "upi");
        assert_eq!(order.payment_status, "paid");
        assert_eq!(order.notes, "ring twice");
    }

    #[test]
    fn test_new_order_missing_fields_in_order() {
        let result = NewOrder::try_from(CreateOrderCommand::default());
        assert!(matches!(result, Err(OrderError::MissingField("user_id"))));

        let result = NewOrder::try_from(CreateOrderCommand {
            total_amount: None,
            delivery_address: None,
            ..complete()
        });
        assert!(matches!(result, Err(OrderError::MissingField("total_amount"))));

        let result = NewOrder::try_from(CreateOrderCommand {
            delivery_address: Some(String::new()),
            ..complete()
        });
        assert!(matches!(
            result,
            Err(OrderError::MissingField("delivery_address"))
        ));
    }

    #[test]
    fn test_new_order_zero_amount_is_missing() {
        let result = NewOrder::try_from(CreateOrderCommand {
            total_amount: Some(0.0),
            ..complete()
        });
        assert!(matches!(result, Err(OrderError::MissingField("total_amount"))));
    }

    #[test]
    fn test_order_id_untagged() {
        let numeric: OrderId = serde_json::from_str("17").unwrap();
        let text: OrderId = serde_json::from_str("\"3f1c\"").unwrap();

        assert_eq!(numeric, OrderId::Numeric(17));
        assert_eq!(text, OrderId::Text("3f1c".to_string()));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "17");
    }
}
