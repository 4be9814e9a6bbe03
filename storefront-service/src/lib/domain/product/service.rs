use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductQuery;
use crate::domain::product::models::DEFAULT_CATEGORIES;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        let products = self.repository.list(&query).await?;
        tracing::debug!(?query, count = products.len(), "Listed products");
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn list_categories(&self) -> Vec<String> {
        match self.repository.list_categories().await {
            Ok(categories) if !categories.is_empty() => categories
                .into_iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            Ok(_) => {
                tracing::warn!("No products found, serving default categories");
                default_categories()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read categories, serving defaults");
                default_categories()
            }
        }
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}
