//! Inventory Domain
//!
//! Product inventory queries (filter, two-key sort, pagination), per-category
//! stock metrics, and stock transitions over a storage-agnostic repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Stock transitions, timestamps, locking
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼──┐ ┌──▼──────┐
//! │query│ │ metrics │  ← Pure pipelines over the full product list
//! └─────┘ └─────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, query types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{handlers, InMemoryProductRepository, InventoryService};
//!
//! let repository = InMemoryProductRepository::new();
//! let service = InventoryService::new(repository);
//!
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ErrorResponse, InventoryError, InventoryResult};
pub use handlers::ApiDoc;
pub use models::{
    MetricsRow, PageResult, Product, ProductDraft, ProductQuery, SortDirection, SortKey, SortSpec,
    DEFAULT_PAGE_SIZE, DEFAULT_REPLENISH_QUANTITY, OVERALL_CATEGORY,
};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::{InventoryService, ServiceConfig};
