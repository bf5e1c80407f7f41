use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::stock::StockLevel;

/// Catalog fields a page can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortField {
    Name,
    Price,
    CreatedAt,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Product entity - a catalog row joined with its category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in cents (for precision)
    pub price: i64,
    pub image_url: String,
    /// Display name of the owning category
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product category
///
/// Names are unique in the store; many products share one category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Catalog row enriched with the live stock count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in cents
    pub price: i64,
    pub image_url: String,
    pub category: String,
    pub stock: StockLevel,
}

impl CatalogItem {
    pub fn new(product: Product, stock: StockLevel) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category: product.category,
            stock,
        }
    }
}

/// One page of the catalog with its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    /// Zero-based page index
    pub page: u64,
    pub page_size: u64,
    /// Total rows matching the filter, not just this page
    pub total_items: u64,
    pub total_pages: u64,
}

/// Filter criteria for catalog queries
///
/// Every field is independently optional; absence means no constraint on
/// that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Category display names (exact match, any-of)
    pub categories: Option<Vec<String>>,
    /// Minimum price in cents, inclusive
    pub min_price: Option<i64>,
    /// Maximum price in cents, inclusive
    pub max_price: Option<i64>,
    /// Raw "field,direction" sort token
    pub sort: Option<String>,
}

/// Query-string parameters of the catalog endpoint
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct CatalogQuery {
    /// Zero-based page index
    #[serde(default)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_page_size")]
    pub size: u64,
    /// Comma-separated category names
    pub categories: Option<String>,
    /// Minimum price in cents
    pub min_price: Option<i64>,
    /// Maximum price in cents
    pub max_price: Option<i64>,
    /// Sort expression as "field,direction", e.g. "price,desc"
    pub sort: Option<String>,
}

fn default_page_size() -> u64 {
    20
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            categories: None,
            min_price: None,
            max_price: None,
            sort: None,
        }
    }
}

impl CatalogQuery {
    /// Split the wire representation into the domain filter
    pub fn filter(&self) -> ProductFilter {
        let categories = self
            .categories
            .as_ref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty());

        ProductFilter {
            categories,
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort.clone(),
        }
    }
}

/// DTO for creating a single product or one record of an import batch
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    pub image_url: String,
    /// Category display name; an existing category is reused, a missing one
    /// is created
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Stock count seeded into the stock service after the product commits
    #[validate(range(min = 0))]
    #[serde(default)]
    pub initial_stock: i64,
}

/// DTO for updating an existing product; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    /// When present, the stock service is updated to this quantity
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
}

/// Repository-level insert record with the category already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
    pub category: Category,
}

impl NewProduct {
    pub fn from_descriptor(input: &CreateProduct, category: Category) -> Self {
        Self {
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            image_url: input.image_url.clone(),
            category,
        }
    }
}
