use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Categories served when the catalog is empty or unreachable.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Dairy", "Bakery", "Grains", "Fruits", "Vegetables"];

pub const DEFAULT_RATING: f64 = 4.5;

/// Catalog entry, read-only from this service.
///
/// Optional store columns are resolved to their defaults by the adapter, so
/// `rating`, `reviews` and `stock` are always present here.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse a path segment; only plain integers name a product.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Catalog listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    All,
    Category(String),
    /// Case-insensitive substring match on name or description.
    Search(String),
}

impl ProductQuery {
    /// Resolve the `category` and `search` query parameters.
    ///
    /// A non-empty search wins over the category; the pseudo-category `All`
    /// and an empty category both list everything.
    pub fn from_params(category: Option<&str>, search: Option<&str>) -> Self {
        if let Some(term) = search.filter(|term| !term.is_empty()) {
            return Self::Search(term.to_string());
        }

        match category {
            Some(category) if !category.is_empty() && category != "All" => {
                Self::Category(category.to_string())
            }
            _ => Self::All,
        }
    }
}
