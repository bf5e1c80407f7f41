//! API routes module

pub mod health;

use axum::Router;
use domain_catalog::{handlers, CatalogService, HttpStockClient, PgCatalogRepository};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let repository = PgCatalogRepository::new(state.db.clone());
    let stock = HttpStockClient::new(
        state.config.stock.base_url.clone(),
        state.config.stock.timeout(),
    )?;
    let service = CatalogService::new(repository, stock);

    Ok(Router::new().nest("/products", handlers::router(service)))
}
