use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{InventoryError, InventoryResult};
use crate::models::Product;

/// Repository trait for Product persistence
///
/// The query, metrics and stock operations only ever talk to this trait, so any
/// storage backend can sit behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product when it is not yet persisted, otherwise replace the
    /// stored record with the same id.
    async fn save(&self, product: Product) -> InventoryResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<Product>>;

    /// Every stored product, in no guaranteed order
    async fn find_all(&self) -> InventoryResult<Vec<Product>>;

    /// Distinct category labels currently in the store
    async fn find_all_categories(&self) -> InventoryResult<Vec<String>>;

    async fn count_all(&self) -> InventoryResult<u64>;

    /// Delete a product by ID; deleting an unknown id is not an error
    async fn delete_by_id(&self, id: i64) -> InventoryResult<()>;
}

/// In-memory implementation of ProductRepository
///
/// Records are kept ordered by id, so `find_all` yields insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> InventoryResult<Product> {
        let mut products = self.products.write().await;

        if !product.is_persisted() {
            product.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            products.insert(product.id, product.clone());

            tracing::info!(product_id = product.id, "Created product");
            return Ok(product);
        }

        let existing = products
            .get_mut(&product.id)
            .ok_or(InventoryError::NotFound(product.id))?;

        existing.name = product.name;
        existing.category = product.category;
        existing.unit_price = product.unit_price;
        existing.expiration_date = product.expiration_date;
        existing.stock = product.stock;
        existing.updated_at = product.updated_at;

        tracing::info!(product_id = existing.id, "Updated product");
        Ok(existing.clone())
    }

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_all(&self) -> InventoryResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_all_categories(&self) -> InventoryResult<Vec<String>> {
        let products = self.products.read().await;

        let mut seen = HashSet::new();
        let categories = products
            .values()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect();

        Ok(categories)
    }

    async fn count_all(&self) -> InventoryResult<u64> {
        let products = self.products.read().await;
        Ok(products.len() as u64)
    }

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}
