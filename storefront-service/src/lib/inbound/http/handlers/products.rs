use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductQuery;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsParams {
    category: Option<String>,
    search: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<ApiSuccess<Vec<ProductData>>, ApiError> {
    let query = ProductQuery::from_params(params.category.as_deref(), params.search.as_deref());

    let products = state.product_service.list_products(query).await?;

    Ok(ApiSuccess::list(
        StatusCode::OK,
        products.iter().map(ProductData::from).collect(),
    ))
}

/// Non-numeric ids answer the same `404` as unknown ones.
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let id = ProductId::parse(&raw_id).ok_or(ProductError::NotFound(raw_id))?;

    state
        .product_service
        .get_product(id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

pub async fn list_categories(State(state): State<AppState>) -> ApiSuccess<Vec<String>> {
    ApiSuccess::new(StatusCode::OK, state.product_service.list_categories().await)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i64,
    pub rating: f64,
    pub reviews: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.value(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            description: product.description.clone(),
            image: product.image.clone(),
            stock: product.stock,
            rating: product.rating,
            reviews: product.reviews,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
