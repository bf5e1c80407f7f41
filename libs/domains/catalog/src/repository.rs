use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, NewProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for catalog persistence
///
/// Products and categories live behind one seam because imports resolve
/// category references before the product write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch one page of products matching the filter, together with the
    /// total number of matching rows.
    ///
    /// Both numbers must come from the same compiled predicate, or the
    /// pagination metadata skews against the page content.
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: u64,
        page_size: u64,
    ) -> CatalogResult<(Vec<Product>, u64)>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Insert a single product with its category already resolved
    async fn insert(&self, input: NewProduct) -> CatalogResult<Product>;

    /// Insert a batch of products in one bulk write, preserving input order
    async fn insert_many(&self, inputs: Vec<NewProduct>) -> CatalogResult<Vec<Product>>;

    /// Overwrite the provided fields of an existing product
    ///
    /// `category` carries the resolved row when the update changes the
    /// category reference.
    async fn update(
        &self,
        id: Uuid,
        input: UpdateProduct,
        category: Option<Category>,
    ) -> CatalogResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> CatalogResult<()>;

    /// Fetch the categories whose names appear in `names`
    async fn find_categories_by_name(&self, names: &[String]) -> CatalogResult<Vec<Category>>;

    /// Create a new category with the given display name
    async fn create_category(&self, name: &str) -> CatalogResult<Category>;

    /// List all categories
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;
}
