use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::lenient_timestamp;
use crate::domain::errors::StoreError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductQuery;
use crate::domain::product::models::DEFAULT_RATING;
use crate::domain::product::ports::ProductRepository;
use crate::outbound::store_client::StoreQuery;
use crate::outbound::store_client::SupabaseClient;

const TABLE: &str = "products";
const SEARCH_COLUMNS: [&str; 2] = ["name", "description"];

pub struct SupabaseProductRepository {
    client: SupabaseClient,
}

impl SupabaseProductRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn list_query(query: &ProductQuery) -> StoreQuery {
    let base = StoreQuery::new().select("*");
    match query {
        ProductQuery::All => base,
        ProductQuery::Category(category) => base.eq("category", category),
        ProductQuery::Search(term) => base.ilike_any(&SEARCH_COLUMNS, term),
    }
}

#[async_trait]
impl ProductRepository for SupabaseProductRepository {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = self.client.select(TABLE, &list_query(query)).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let query = StoreQuery::new().select("*").eq("id", id.value());
        let rows: Vec<ProductRow> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().next().map(Product::from))
    }

    async fn list_categories(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<CategoryRow> = self
            .client
            .select(TABLE, &StoreQuery::new().select("category"))
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.category)
            .filter(|category| !category.trim().is_empty())
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    stock: Option<i64>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    reviews: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            price: row.price.unwrap_or(0.0),
            description: row.description,
            image: row.image,
            stock: row.stock.unwrap_or(0),
            rating: row.rating.unwrap_or(DEFAULT_RATING),
            reviews: row.reviews.unwrap_or(0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category: Option<String>,
}
