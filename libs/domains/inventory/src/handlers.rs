//! HTTP handlers for the Inventory API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{ErrorResponse, InventoryError, InventoryResult};
use crate::extractors::JsonBody;
use crate::models::{
    MetricsRow, PageResult, Product, ProductDraft, ProductQuery, SortDirection, SortKey, SortSpec,
    DEFAULT_PAGE_SIZE,
};
use crate::repository::ProductRepository;
use crate::service::InventoryService;

/// OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_all_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        mark_out_of_stock,
        mark_in_stock,
        get_metrics,
        get_categories,
        count_products,
    ),
    components(
        schemas(
            Product, ProductDraft, PageResult<Product>, MetricsRow,
            SortKey, SortDirection, ErrorResponse
        )
    ),
    tags(
        (name = "Inventory", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the inventory router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: InventoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/all", get(list_all_products))
        .route("/metrics", get(get_metrics))
        .route("/categories", get(get_categories))
        .route("/count", get(count_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/outofstock", post(mark_out_of_stock))
        .route("/{id}/inStock", put(mark_in_stock))
        .route("/{id}/instock", put(mark_in_stock))
        .with_state(shared_service)
}

/// Query string accepted by the product listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive name substring
    pub name: Option<String>,
    /// Comma-separated category labels
    pub categories: Option<String>,
    /// `true` for products in stock, `false` for products out of stock
    pub available: Option<bool>,
    /// Primary sort key (defaults to id)
    pub sort_by1: Option<String>,
    /// `asc` or `desc` (defaults to asc)
    pub sort_dir1: Option<String>,
    /// Tie-break sort key
    pub sort_by2: Option<String>,
    pub sort_dir2: Option<String>,
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        let categories = params
            .categories
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: params.name,
            categories,
            available: params.available,
            primary_sort: SortSpec::primary(
                params.sort_by1.as_deref(),
                params.sort_dir1.as_deref(),
            ),
            secondary_sort: SortSpec::secondary(
                params.sort_by2.as_deref(),
                params.sort_dir2.as_deref(),
            ),
            page: params.page,
            size: params.size,
        }
    }
}

fn positive_id(id: i64) -> InventoryResult<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(InventoryError::InvalidArgument(format!(
            "Product id must be positive, got {}",
            id
        )))
    }
}

/// List products with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Inventory",
    params(ListParams),
    responses(
        (status = 200, description = "One page of products", body = PageResult<Product>),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Query(params): Query<ListParams>,
) -> InventoryResult<Json<PageResult<Product>>> {
    let page = service.list_products(params.into()).await?;
    Ok(Json(page))
}

/// List every product without paging
#[utoipa::path(
    get,
    path = "/all",
    tag = "Inventory",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn list_all_products<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<Vec<Product>>> {
    let products = service.list_all().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Inventory",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    JsonBody(draft): JsonBody<ProductDraft>,
) -> InventoryResult<impl IntoResponse> {
    let product = service.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Path(id): Path<i64>,
) -> InventoryResult<Json<Product>> {
    let product = service.get_product(positive_id(id)?).await?;
    Ok(Json(product))
}

/// Replace a product's fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Path(id): Path<i64>,
    JsonBody(draft): JsonBody<ProductDraft>,
) -> InventoryResult<Json<Product>> {
    let product = service.update_product(positive_id(id)?, draft).await?;
    Ok(Json(product))
}

/// Delete a product (idempotent)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted or never existed")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Path(id): Path<i64>,
) -> InventoryResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a product as out of stock
#[utoipa::path(
    post,
    path = "/{id}/outofstock",
    tag = "Inventory",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Stock set to zero"),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn mark_out_of_stock<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Path(id): Path<i64>,
) -> InventoryResult<impl IntoResponse> {
    service.mark_out_of_stock(positive_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replenish a product's stock
///
/// Also served at the lowercase `/{id}/instock`.
#[utoipa::path(
    put,
    path = "/{id}/inStock",
    tag = "Inventory",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Stock replenished"),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Stock counter would overflow", body = ErrorResponse)
    )
)]
async fn mark_in_stock<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    Path(id): Path<i64>,
) -> InventoryResult<impl IntoResponse> {
    service.mark_in_stock(positive_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stock metrics per category plus the overall row
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Inventory",
    responses(
        (status = 200, description = "Metrics rows, Overall last", body = Vec<MetricsRow>)
    )
)]
async fn get_metrics<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<Vec<MetricsRow>>> {
    let rows = service.get_metrics().await?;
    Ok(Json(rows))
}

/// Distinct category labels
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Inventory",
    responses(
        (status = 200, description = "Category labels", body = Vec<String>)
    )
)]
async fn get_categories<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<Vec<String>>> {
    let categories = service.get_categories().await?;
    Ok(Json(categories))
}

/// Number of stored products
#[utoipa::path(
    get,
    path = "/count",
    tag = "Inventory",
    responses(
        (status = 200, description = "Product count", body = u64)
    )
)]
async fn count_products<R: ProductRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<u64>> {
    let count = service.count_products().await?;
    Ok(Json(count))
}
