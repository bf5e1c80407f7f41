//! Catalog service - business logic layer
//!
//! Orchestrates the filter compiler, the product store, and the stock
//! collaborator into the catalog query, single-item mutation, and bulk
//! import operations.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogItem, CatalogPage, CatalogQuery, Category, CreateProduct, NewProduct, Product,
    UpdateProduct,
};
use crate::repository::CatalogRepository;
use crate::stock::{StockClient, StockLevel};

/// Ceiling on caller-supplied page sizes
pub const MAX_PAGE_SIZE: u64 = 200;

/// Catalog service combining the product store with the stock collaborator
///
/// Read paths absorb stock failures (the catalog stays browsable when the
/// collaborator is degraded); write paths propagate them.
pub struct CatalogService<R: CatalogRepository, S: StockClient> {
    repository: Arc<R>,
    stock: Arc<S>,
}

impl<R: CatalogRepository, S: StockClient> CatalogService<R, S> {
    pub fn new(repository: R, stock: S) -> Self {
        Self {
            repository: Arc::new(repository),
            stock: Arc::new(stock),
        }
    }

    /// Query one page of the catalog, enriched with live stock counts
    #[instrument(skip(self))]
    pub async fn catalog_page(&self, query: CatalogQuery) -> CatalogResult<CatalogPage> {
        if query.size == 0 {
            return Err(CatalogError::Validation(
                "page size must be greater than zero".to_string(),
            ));
        }

        let page_size = if query.size > MAX_PAGE_SIZE {
            warn!(requested = query.size, "Clamping page size to {}", MAX_PAGE_SIZE);
            MAX_PAGE_SIZE
        } else {
            query.size
        };

        let criteria = query.filter();
        let (products, total_items) = self
            .repository
            .find_page(&criteria, query.page, page_size)
            .await?;

        // Enrichment runs row by row in store order; a failed lookup
        // degrades that row, never the page.
        let mut items = Vec::with_capacity(products.len());
        for product in products {
            items.push(self.enrich(product).await);
        }

        Ok(CatalogPage {
            items,
            page: query.page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size),
        })
    }

    /// Get a single product by ID, enriched with its stock count
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<CatalogItem> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        Ok(self.enrich(product).await)
    }

    /// Create a new product and seed its stock record
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category = self.resolve_category(&input.category).await?;
        let initial_stock = input.initial_stock;

        let product = self
            .repository
            .insert(NewProduct::from_descriptor(&input, category))
            .await?;

        // A stock failure here propagates: the product row may already be
        // committed without an initialized stock record, and the caller has
        // to know.
        self.stock
            .create_stock(StockLevel::new(product.id, initial_stock))
            .await?;

        Ok(product)
    }

    /// Update an existing product; a stock quantity in the patch is pushed
    /// to the stock collaborator
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category = match &input.category {
            Some(name) => Some(self.resolve_category(name).await?),
            None => None,
        };

        let quantity = input.stock;
        let product = self.repository.update(id, input, category).await?;

        if let Some(quantity) = quantity {
            self.stock.update_stock(id, quantity).await?;
        }

        Ok(product)
    }

    /// Delete a product
    ///
    /// The stock record is left behind; its lifecycle is independent and an
    /// orphaned record reads as zero.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        self.repository.delete(id).await
    }

    /// List all categories
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Import a batch of products in one bulk write
    ///
    /// Category references are resolved up front so descriptors sharing a
    /// name share one row, then stock initialization fans out concurrently
    /// with per-record failure logging.
    #[instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn import_products(&self, batch: Vec<CreateProduct>) -> CatalogResult<()> {
        for descriptor in &batch {
            descriptor
                .validate()
                .map_err(|e| CatalogError::Validation(e.to_string()))?;
        }

        let categories = self.resolve_categories(&batch).await?;

        let records = batch
            .iter()
            .map(|descriptor| {
                NewProduct::from_descriptor(descriptor, categories[&descriptor.category].clone())
            })
            .collect();

        let products = self.repository.insert_many(records).await?;

        // Fire-and-forget fan-out: every initialization is issued
        // concurrently and a failure never blocks or fails its siblings.
        let initializations = products.iter().zip(&batch).map(|(product, descriptor)| {
            let level = StockLevel::new(product.id, descriptor.initial_stock);
            async move {
                if let Err(err) = self.stock.create_stock(level).await {
                    warn!(
                        product_id = %level.product_id,
                        error = %err,
                        "Stock initialization failed for imported product"
                    );
                }
            }
        });
        join_all(initializations).await;

        Ok(())
    }

    /// Attach the live stock count to a product, degrading to zero when the
    /// collaborator fails
    async fn enrich(&self, product: Product) -> CatalogItem {
        let stock = match self.stock.get_stock(product.id).await {
            Ok(level) => level,
            Err(err) => {
                warn!(
                    product_id = %product.id,
                    error = %err,
                    "Stock lookup failed, serving zero stock"
                );
                StockLevel::empty(product.id)
            }
        };

        CatalogItem::new(product, stock)
    }

    /// Reuse the category with this name, or create it
    async fn resolve_category(&self, name: &str) -> CatalogResult<Category> {
        let names = [name.to_string()];
        if let Some(existing) = self
            .repository
            .find_categories_by_name(&names)
            .await?
            .into_iter()
            .next()
        {
            return Ok(existing);
        }

        self.repository.create_category(name).await
    }

    /// Resolve every distinct category name in the batch, creating exactly
    /// one row per missing name before the bulk product write
    async fn resolve_categories(
        &self,
        batch: &[CreateProduct],
    ) -> CatalogResult<HashMap<String, Category>> {
        let mut names: Vec<String> = Vec::new();
        for descriptor in batch {
            if !names.contains(&descriptor.category) {
                names.push(descriptor.category.clone());
            }
        }

        let mut resolved: HashMap<String, Category> = self
            .repository
            .find_categories_by_name(&names)
            .await?
            .into_iter()
            .map(|category| (category.name.clone(), category))
            .collect();

        for name in &names {
            if !resolved.contains_key(name) {
                let category = self.repository.create_category(name).await?;
                resolved.insert(name.clone(), category);
            }
        }

        Ok(resolved)
    }
}

impl<R: CatalogRepository, S: StockClient> Clone for CatalogService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            stock: Arc::clone(&self.stock),
        }
    }
}
