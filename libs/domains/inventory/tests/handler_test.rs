//! Handler tests for the Inventory domain
//!
//! These tests drive the domain router directly with `oneshot`:
//! - Request deserialization (JSON / query string → Rust structs)
//! - Response serialization and camelCase field names
//! - HTTP status codes and error bodies

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_inventory::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seeded_service() -> InventoryService<InMemoryProductRepository> {
    let service = InventoryService::new(InMemoryProductRepository::new());
    for (name, category, price, stock) in [
        ("Apple", "X", 10.0, 2),
        ("Bread", "Y", 20.0, 3),
        ("Cherry", "X", 15.0, 0),
    ] {
        service
            .create_product(ProductDraft {
                name: name.to_string(),
                category: category.to_string(),
                unit_price: price,
                expiration_date: None,
                stock,
            })
            .await
            .unwrap();
    }
    service
}

#[tokio::test]
async fn test_create_product_returns_201_and_ignores_client_timestamps() {
    let app = handlers::router(InventoryService::new(InMemoryProductRepository::new()));

    let request = json_request(
        "POST",
        "/",
        json!({
            "id": 77,
            "name": "Butter",
            "category": "Dairy",
            "unitPrice": 3.5,
            "expirationDate": "2027-03-01",
            "inStock": 6,
            "createdAt": "1999-01-01T00:00:00Z",
            "updatedAt": "1999-01-01T00:00:00Z"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Butter");
    assert_eq!(body["inStock"], 6);
    assert_eq!(body["expirationDate"], "2027-03-01");
    assert!(!body["createdAt"].as_str().unwrap().starts_with("1999"));
}

#[tokio::test]
async fn test_list_products_applies_query_string() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .oneshot(empty_request(
            "GET",
            "/?categories=X&sortBy1=unitPrice&sortDir1=desc&page=0&size=1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: PageResult<Product> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].name, "Cherry");
}

#[tokio::test]
async fn test_list_products_page_out_of_range_is_empty() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .oneshot(empty_request("GET", "/?page=5&size=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["content"], json!([]));
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["pageNumber"], 5);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = handlers::router(seeded_service().await);

    let response = app.oneshot(empty_request("GET", "/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            { "category": "X", "totalStock": 2, "totalValue": 20.0, "averagePrice": 10.0 },
            { "category": "Y", "totalStock": 3, "totalValue": 60.0, "averagePrice": 20.0 },
            { "category": "Overall", "totalStock": 5, "totalValue": 80.0, "averagePrice": 16.0 }
        ])
    );
}

#[tokio::test]
async fn test_categories_endpoint() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .oneshot(empty_request("GET", "/categories"))
        .await
        .unwrap();
    let categories: Vec<String> = json_body(response.into_body()).await;
    assert_eq!(categories, vec!["X", "Y"]);
}

#[tokio::test]
async fn test_stock_transitions_return_204() {
    let service = seeded_service().await;
    let app = handlers::router(service.clone());

    let response = app
        .clone()
        .oneshot(empty_request("PUT", "/3/inStock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(service.get_product(3).await.unwrap().stock, 10);

    let response = app
        .clone()
        .oneshot(empty_request("PUT", "/3/instock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(service.get_product(3).await.unwrap().stock, 20);

    let response = app
        .oneshot(empty_request("POST", "/3/outofstock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(service.get_product(3).await.unwrap().stock, 0);
}

#[tokio::test]
async fn test_unknown_product_returns_404_body() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .oneshot(empty_request("POST", "/999/outofstock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
    assert!(error.message.contains("999"));
}

#[tokio::test]
async fn test_replenishment_overflow_returns_409_body() {
    let service = seeded_service().await;
    service
        .update_product(
            1,
            ProductDraft {
                name: "Apple".to_string(),
                category: "X".to_string(),
                unit_price: 10.0,
                expiration_date: None,
                stock: u32::MAX,
            },
        )
        .await
        .unwrap();
    let app = handlers::router(service.clone());

    let response = app
        .oneshot(empty_request("PUT", "/1/inStock"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1008);
    assert_eq!(error.error, "CONFLICT");
    assert_eq!(service.get_product(1).await.unwrap().stock, u32::MAX);
}

#[tokio::test]
async fn test_malformed_body_returns_400_body() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "category": "X", "unitPrice": 1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_ARGUMENT");
    assert!(error.message.contains("name"));

    let request = Request::builder()
        .method("PUT")
        .uri("/1")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1001);
}

#[tokio::test]
async fn test_non_positive_id_is_bad_request() {
    let app = handlers::router(seeded_service().await);

    let response = app.oneshot(empty_request("GET", "/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let service = seeded_service().await;
    let app = handlers::router(service.clone());

    let response = app
        .oneshot(json_request(
            "PUT",
            "/1",
            json!({ "name": "Green Apple", "category": "X", "unitPrice": 11.0, "inStock": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Green Apple");
    assert_eq!(product.unit_price, 11.0);
    assert_eq!(product.stock, 4);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let service = seeded_service().await;
    let app = handlers::router(service.clone());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", "/2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    assert_eq!(service.count_products().await.unwrap(), 2);
}

#[tokio::test]
async fn test_list_all_and_count() {
    let app = handlers::router(seeded_service().await);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/all"))
        .await
        .unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 3);

    let response = app.oneshot(empty_request("GET", "/count")).await.unwrap();
    let count: u64 = json_body(response.into_body()).await;
    assert_eq!(count, 3);
}
