use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductQuery;

/// Port for catalog service operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// List products matching the query.
    ///
    /// # Errors
    /// * `Store` - The catalog could not be read
    async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError>;

    /// Retrieve a single product.
    ///
    /// # Errors
    /// * `NotFound` - No product has this id
    /// * `Store` - The catalog could not be read
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Sorted, de-duplicated category names.
    ///
    /// Never fails: an empty or unreachable catalog yields the default categories.
    async fn list_categories(&self) -> Vec<String>;
}

/// Read access to the `products` collection.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Category of every product row, duplicates included.
    async fn list_categories(&self) -> Result<Vec<String>, StoreError>;
}
