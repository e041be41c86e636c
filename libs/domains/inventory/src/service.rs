//! Inventory Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::{InventoryError, InventoryResult};
use crate::metrics;
use crate::models::{
    MetricsRow, PageResult, Product, ProductDraft, ProductQuery, DEFAULT_REPLENISH_QUANTITY,
};
use crate::query;
use crate::repository::ProductRepository;

/// Tunables for the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Units added by [`InventoryService::mark_in_stock`]
    pub replenish_quantity: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            replenish_quantity: DEFAULT_REPLENISH_QUANTITY,
        }
    }
}

/// Inventory service: product queries, metrics and stock transitions.
///
/// Read-modify-write operations are serialized through a service-wide lock so
/// two concurrent transitions on the same product never lose an update.
pub struct InventoryService<R: ProductRepository> {
    repository: Arc<R>,
    config: ServiceConfig,
    write_lock: Arc<Mutex<()>>,
}

impl<R: ProductRepository> InventoryService<R> {
    /// Create a new InventoryService with the default configuration
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, ServiceConfig::default())
    }

    pub fn with_config(repository: R, config: ServiceConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    /// Filter, sort and paginate the product list
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> InventoryResult<PageResult<Product>> {
        let products = self.repository.find_all().await?;
        let page = query::execute(products, &query);

        tracing::debug!(
            total = page.total_elements,
            returned = page.content.len(),
            "Listed products"
        );
        Ok(page)
    }

    /// Every product, unfiltered and unpaged
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> InventoryResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Per-category metrics followed by the overall row
    #[instrument(skip(self))]
    pub async fn get_metrics(&self) -> InventoryResult<Vec<MetricsRow>> {
        let products = self.repository.find_all().await?;
        let categories = self.repository.find_all_categories().await?;
        Ok(metrics::compute(&products, &categories))
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> InventoryResult<Vec<String>> {
        self.repository.find_all_categories().await
    }

    #[instrument(skip(self))]
    pub async fn count_products(&self) -> InventoryResult<u64> {
        self.repository.count_all().await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> InventoryResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(InventoryError::NotFound(id))
    }

    /// Create a new product; both timestamps come from the server clock
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> InventoryResult<Product> {
        let product = Product::new(draft, Utc::now());
        self.repository.save(product).await
    }

    /// Replace every client-owned field of an existing product
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, id: i64, draft: ProductDraft) -> InventoryResult<Product> {
        let _guard = self.write_lock.lock().await;

        let mut product = self.get_product(id).await?;
        product.apply_draft(draft, Utc::now());
        self.repository.save(product).await
    }

    /// Delete a product; unknown ids are ignored
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> InventoryResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// Set a product's stock to zero
    #[instrument(skip(self))]
    pub async fn mark_out_of_stock(&self, id: i64) -> InventoryResult<Product> {
        self.transition(id, |product| {
            product.stock = 0;
            Ok(())
        })
        .await
    }

    /// Add the configured replenishment quantity to a product's stock
    ///
    /// Repeated calls keep accumulating. A replenishment that would not fit
    /// in the stock counter fails with `StockOverflow` and stores nothing.
    #[instrument(skip(self))]
    pub async fn mark_in_stock(&self, id: i64) -> InventoryResult<Product> {
        let quantity = self.config.replenish_quantity;
        self.transition(id, |product| {
            product.stock = product
                .stock
                .checked_add(quantity)
                .ok_or(InventoryError::StockOverflow(product.id))?;
            Ok(())
        })
        .await
    }

    async fn transition<F>(&self, id: i64, apply: F) -> InventoryResult<Product>
    where
        F: FnOnce(&mut Product) -> InventoryResult<()>,
    {
        let _guard = self.write_lock.lock().await;

        let mut product = self.get_product(id).await?;
        apply(&mut product)?;
        product.updated_at = Utc::now();

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = id, stock = saved.stock, "Stock changed");
        Ok(saved)
    }
}

impl<R: ProductRepository> Clone for InventoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config,
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}
