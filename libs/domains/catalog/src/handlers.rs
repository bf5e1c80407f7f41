use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::{
    error::CatalogResult,
    models::{
        CatalogItem, CatalogPage, CatalogQuery, Category, CreateProduct, Product, UpdateProduct,
    },
    repository::CatalogRepository,
    service::CatalogService,
    stock::{StockClient, StockLevel},
};

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_catalog,
        create_product,
        import_products,
        get_product,
        update_product,
        delete_product,
        list_categories,
    ),
    components(schemas(
        Product,
        Category,
        CatalogItem,
        CatalogPage,
        CreateProduct,
        UpdateProduct,
        StockLevel,
        MessageResponse
    )),
    tags(
        (name = "catalog", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Message response for accepted/ack endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create Axum router for catalog endpoints
pub fn router<R, S>(service: CatalogService<R, S>) -> Router
where
    R: CatalogRepository + 'static,
    S: StockClient + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/", get(list_catalog).post(create_product))
        .route("/import", post(import_products))
        .route("/categories", get(list_categories))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(service)
}

/// Query a page of the catalog, filtered, sorted, and enriched with stock
#[utoipa::path(
    get,
    path = "",
    tag = "catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "One page of matching products", body = CatalogPage),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
async fn list_catalog<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Query(query): Query<CatalogQuery>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    let page = service.catalog_page(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "catalog",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failure"),
        (status = 502, description = "Stock service unavailable")
    )
)]
async fn create_product<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Json(input): Json<CreateProduct>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Import a batch of products
#[utoipa::path(
    post,
    path = "/import",
    tag = "catalog",
    request_body = Vec<CreateProduct>,
    responses(
        (status = 202, description = "Batch accepted", body = MessageResponse),
        (status = 400, description = "Validation failure")
    )
)]
async fn import_products<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Json(batch): Json<Vec<CreateProduct>>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    service.import_products(batch).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Import accepted".to_string(),
        }),
    ))
}

/// Get a product by ID, enriched with its stock count
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = CatalogItem),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    let item = service.get_product(id).await?;
    Ok(Json(item))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Product not found"),
        (status = 502, description = "Stock service unavailable")
    )
)]
async fn update_product<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// The stock record is not cascaded; it reads as orphaned on the stock side.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "catalog",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
async fn delete_product<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
async fn list_categories<R, S>(
    State(service): State<Arc<CatalogService<R, S>>>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
    S: StockClient,
{
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}
