//! Catalog Domain
//!
//! Paginated, filterable catalog queries over a relational product store,
//! enriched per row with live stock counts from an external collaborator,
//! plus single-item mutations and bulk import with category dedup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──▶ │ Stock Client │  ← external stock collaborator
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use domain_catalog::{
//!     handlers,
//!     postgres::PgCatalogRepository,
//!     service::CatalogService,
//!     stock::HttpStockClient,
//! };
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgCatalogRepository::new(db);
//! let stock = HttpStockClient::new("http://stock:8081", Duration::from_secs(3))?;
//! let service = CatalogService::new(repository, stock);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod stock;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    CatalogItem, CatalogPage, CatalogQuery, Category, CreateProduct, Product, ProductFilter,
    UpdateProduct,
};
pub use postgres::PgCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
pub use stock::{HttpStockClient, StockClient, StockLevel};
