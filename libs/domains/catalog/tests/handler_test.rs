//! Handler tests for the catalog domain
//!
//! These tests verify that the HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! The repository and the stock collaborator are mocked at their traits, so
//! the suite runs without a database or a live stock service.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use domain_catalog::models::NewProduct;
use domain_catalog::stock::StockError;
use domain_catalog::*;
use http_body_util::BodyExt;
use mockall::mock;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

mock! {
    Repo {}

    #[async_trait]
    impl CatalogRepository for Repo {
        async fn find_page(
            &self,
            filter: &ProductFilter,
            page: u64,
            page_size: u64,
        ) -> CatalogResult<(Vec<Product>, u64)>;
        async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;
        async fn insert(&self, input: NewProduct) -> CatalogResult<Product>;
        async fn insert_many(&self, inputs: Vec<NewProduct>) -> CatalogResult<Vec<Product>>;
        async fn update(
            &self,
            id: Uuid,
            input: UpdateProduct,
            category: Option<Category>,
        ) -> CatalogResult<Product>;
        async fn delete(&self, id: Uuid) -> CatalogResult<()>;
        async fn find_categories_by_name(&self, names: &[String]) -> CatalogResult<Vec<Category>>;
        async fn create_category(&self, name: &str) -> CatalogResult<Category>;
        async fn list_categories(&self) -> CatalogResult<Vec<Category>>;
    }
}

mock! {
    Stock {}

    #[async_trait]
    impl StockClient for Stock {
        async fn get_stock(&self, product_id: Uuid) -> Result<StockLevel, StockError>;
        async fn create_stock(&self, stock: StockLevel) -> Result<(), StockError>;
        async fn update_stock(&self, product_id: Uuid, quantity: i64) -> Result<(), StockError>;
    }
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn product(name: &str, price: i64, category: &str) -> Product {
    Product {
        id: Uuid::now_v7(),
        name: name.to_string(),
        description: String::new(),
        price,
        image_url: String::new(),
        category: category.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_list_catalog_returns_enriched_page() {
    let builder = TestDataBuilder::from_test_name("handler_list_page");
    let rows = vec![
        product(&builder.name("product", "a"), 1499, "Books"),
        product(&builder.name("product", "b"), 2999, "Books"),
    ];

    let mut repo = MockRepo::new();
    let page_rows = rows.clone();
    repo.expect_find_page()
        .withf(|filter, page, page_size| {
            filter.categories == Some(vec!["Books".to_string()])
                && *page == 0
                && *page_size == 10
        })
        .returning(move |_, _, _| Ok((page_rows.clone(), 2)));

    let mut stock = MockStock::new();
    stock
        .expect_get_stock()
        .returning(|id| Ok(StockLevel::new(id, 4)));

    let app = handlers::router(CatalogService::new(repo, stock));

    let request = Request::builder()
        .method("GET")
        .uri("/?size=10&categories=Books&sort=price,asc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page: CatalogPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.iter().all(|item| item.stock.available_stock == 4));
}

#[tokio::test]
async fn test_list_catalog_degrades_when_stock_is_down() {
    let mut repo = MockRepo::new();
    let rows = vec![product("Dune", 1499, "Books")];
    repo.expect_find_page()
        .returning(move |_, _, _| Ok((rows.clone(), 1)));

    let mut stock = MockStock::new();
    stock
        .expect_get_stock()
        .returning(|id| Err(StockError::NotFound(id)));

    let app = handlers::router(CatalogService::new(repo, stock));

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page: CatalogPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].stock.available_stock, 0);
}

#[tokio::test]
async fn test_list_catalog_malformed_sort_returns_200() {
    let mut repo = MockRepo::new();
    repo.expect_find_page()
        .withf(|filter, _, _| filter.sort.as_deref() == Some("price,sideways"))
        .returning(|_, _, _| Ok((vec![], 0)));

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/?sort=price,sideways")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_catalog_zero_page_size_returns_400() {
    let app = handlers::router(CatalogService::new(MockRepo::new(), MockStock::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/?size=0")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let name = builder.name("product", "create");

    let mut repo = MockRepo::new();
    repo.expect_find_categories_by_name()
        .returning(|_| Ok(vec![]));
    repo.expect_create_category().returning(|name| {
        Ok(Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
        })
    });
    repo.expect_insert()
        .returning(|record| Ok(product(&record.name, record.price, &record.category.name)));

    let mut stock = MockStock::new();
    stock
        .expect_create_stock()
        .withf(|level| level.available_stock == 12)
        .returning(|_| Ok(()));

    let app = handlers::router(CatalogService::new(repo, stock));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": name,
                "description": "Handler test",
                "price": 1499,
                "category": "Books",
                "initial_stock": 12
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Product = json_body(response.into_body()).await;
    assert_eq!(created.name, name);
    assert_eq!(created.category, "Books");
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let app = handlers::router(CatalogService::new(MockRepo::new(), MockStock::new()));

    // Invalid name (empty string)
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "",
                "price": 1499,
                "category": "Books"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_returns_502_when_stock_write_fails() {
    let mut repo = MockRepo::new();
    repo.expect_find_categories_by_name().returning(|_| {
        Ok(vec![Category {
            id: Uuid::now_v7(),
            name: "Books".to_string(),
        }])
    });
    repo.expect_insert()
        .returning(|record| Ok(product(&record.name, record.price, &record.category.name)));

    let mut stock = MockStock::new();
    stock
        .expect_create_stock()
        .returning(|level| Err(StockError::NotFound(level.product_id)));

    let app = handlers::router(CatalogService::new(repo, stock));

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Dune",
                "price": 1499,
                "category": "Books",
                "initial_stock": 5
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_get_product_returns_404_for_missing() {
    let mut repo = MockRepo::new();
    repo.expect_get_by_id().returning(|_| Ok(None));

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_returns_404_for_missing() {
    let mut repo = MockRepo::new();
    repo.expect_update()
        .returning(|id, _, _| Err(CatalogError::NotFound(id)));

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/{}", Uuid::now_v7()))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "price": 999 })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_returns_204() {
    let mut repo = MockRepo::new();
    repo.expect_delete().returning(|_| Ok(()));

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_product_returns_404_for_missing() {
    let mut repo = MockRepo::new();
    repo.expect_delete()
        .returning(|id| Err(CatalogError::NotFound(id)));

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_import_returns_202() {
    let builder = TestDataBuilder::from_test_name("handler_import_202");

    let mut repo = MockRepo::new();
    repo.expect_find_categories_by_name()
        .returning(|_| Ok(vec![]));
    repo.expect_create_category()
        .times(1)
        .returning(|name| {
            Ok(Category {
                id: Uuid::now_v7(),
                name: name.to_string(),
            })
        });
    repo.expect_insert_many().returning(|records| {
        Ok(records
            .iter()
            .map(|r| product(&r.name, r.price, &r.category.name))
            .collect())
    });

    let mut stock = MockStock::new();
    stock.expect_create_stock().times(2).returning(|_| Ok(()));

    let app = handlers::router(CatalogService::new(repo, stock));

    let request = Request::builder()
        .method("POST")
        .uri("/import")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!([
                {
                    "name": builder.name("product", "one"),
                    "price": 1000,
                    "category": "Books",
                    "initial_stock": 3
                },
                {
                    "name": builder.name("product", "two"),
                    "price": 2000,
                    "category": "Books",
                    "initial_stock": 6
                }
            ]))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_list_categories_returns_all() {
    let mut repo = MockRepo::new();
    repo.expect_list_categories().returning(|| {
        Ok(vec![
            Category {
                id: Uuid::now_v7(),
                name: "Books".to_string(),
            },
            Category {
                id: Uuid::now_v7(),
                name: "Games".to_string(),
            },
        ])
    });

    let app = handlers::router(CatalogService::new(repo, MockStock::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/categories")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let categories: Vec<Category> = json_body(response.into_body()).await;
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Books", "Games"]);
}
