//! Stock service client
//!
//! Typed request/response boundary to the external stock collaborator.
//! Transport only; the degrade-on-failure policy lives in the service layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stock record for one product, as held by the stock service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: Uuid,
    pub available_stock: i64,
}

impl StockLevel {
    pub fn new(product_id: Uuid, available_stock: i64) -> Self {
        Self {
            product_id,
            available_stock,
        }
    }

    /// A product without a stock record reads as zero
    pub fn empty(product_id: Uuid) -> Self {
        Self::new(product_id, 0)
    }
}

/// Errors from the stock collaborator
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("No stock record for product {0}")]
    NotFound(Uuid),

    #[error("Stock request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Stock service returned {0}")]
    Api(StatusCode),
}

/// Typed boundary to the stock collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockClient: Send + Sync {
    /// Fetch the stock record for a product
    async fn get_stock(&self, product_id: Uuid) -> Result<StockLevel, StockError>;

    /// Create the stock record for a newly persisted product
    async fn create_stock(&self, stock: StockLevel) -> Result<(), StockError>;

    /// Overwrite the quantity of an existing stock record
    async fn update_stock(&self, product_id: Uuid, quantity: i64) -> Result<(), StockError>;
}

/// HTTP implementation backed by reqwest
pub struct HttpStockClient {
    client: Client,
    base_url: String,
}

impl HttpStockClient {
    /// Build a client with a hard per-request timeout, so callers hit the
    /// degraded path instead of hanging on a dead collaborator.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StockError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn record_url(&self, product_id: Uuid) -> String {
        format!("{}/api/inventory/{}", self.base_url, product_id)
    }
}

#[async_trait]
impl StockClient for HttpStockClient {
    async fn get_stock(&self, product_id: Uuid) -> Result<StockLevel, StockError> {
        let response = self.client.get(self.record_url(product_id)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StockError::NotFound(product_id)),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(StockError::Api(status)),
        }
    }

    async fn create_stock(&self, stock: StockLevel) -> Result<(), StockError> {
        let response = self
            .client
            .post(format!("{}/api/inventory", self.base_url))
            .json(&stock)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status => Err(StockError::Api(status)),
        }
    }

    async fn update_stock(&self, product_id: Uuid, quantity: i64) -> Result<(), StockError> {
        let response = self
            .client
            .put(format!("{}/{}", self.record_url(product_id), quantity))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            status => Err(StockError::Api(status)),
        }
    }
}
