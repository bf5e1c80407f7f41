use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::stock::StockError;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// The stock collaborator failed on a write path. Read paths absorb
    /// these instead of surfacing them.
    #[error("Stock service unavailable: {0}")]
    Stock(#[from] StockError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("Product {} not found", id)),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Stock(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            Self::Database(msg) | Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
