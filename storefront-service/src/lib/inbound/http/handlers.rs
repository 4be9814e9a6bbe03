use axum::async_trait;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::StoreError;
use crate::domain::order::errors::OrderError;
use crate::domain::product::errors::ProductError;
use crate::user::errors::UserError;

pub mod current_user;
pub mod health;
pub mod login;
pub mod orders;
pub mod products;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.1 .0.message = Some(message.into());
        self
    }
}

impl<U: Serialize + PartialEq> ApiSuccess<Vec<U>> {
    /// List payload, with `count` set to the number of items.
    pub fn list(status: StatusCode, items: Vec<U>) -> Self {
        let count = items.len();
        let mut success = Self::new(status, items);
        success.1 .0.count = Some(count);
        success
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(%msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!(%msg, "Dependency unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        };

        (status, Json(ApiResponseBody::<()>::error(message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        internal_error(err, "External store request failed")
    }
}

/// Logs the store failure and hides its detail from the client.
///
/// A timeout is reported as `503`, everything else as `500` with `message`.
fn internal_error(err: StoreError, message: &str) -> ApiError {
    match err {
        StoreError::Timeout => {
            ApiError::ServiceUnavailable("External store request timed out".to_string())
        }
        _ => {
            tracing::error!(error = %err, context = message, "External store call failed");
            ApiError::InternalServerError(message.to_string())
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingCredentials(e) => ApiError::BadRequest(e.to_string()),
            UserError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::CreateFailed(_) | UserError::Password(_) => {
                tracing::error!(error = %err, "Signup failed");
                ApiError::InternalServerError("Failed to create user".to_string())
            }
            UserError::Store(e) => e.into(),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => ApiError::NotFound("Product not found".to_string()),
            ProductError::Store(e) => internal_error(e, "Failed to get products"),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::MissingField(_) | OrderError::InvalidField(_) => {
                ApiError::BadRequest(err.to_string())
            }
            OrderError::CreateFailed(_) => {
                tracing::error!(error = %err, "Order creation failed");
                ApiError::InternalServerError("Failed to create order".to_string())
            }
            OrderError::Store(e) => internal_error(e, "Order request failed"),
        }
    }
}

/// Uniform JSON envelope for every response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
            count: None,
        }
    }
}

/// JSON request body extractor.
///
/// A missing, unparseable or empty body (`null`, `{}`, `[]`, `""`, `false`)
/// is rejected with `400 "No data provided"`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected request body");
                no_data()
            })?;

        if is_empty(&value) {
            return Err(no_data());
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
    }
}

fn no_data() -> ApiError {
    ApiError::BadRequest("No data provided".to_string())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
