//! Application state management

use domain_inventory::{InMemoryProductRepository, InventoryService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub service: InventoryService<InMemoryProductRepository>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        let service =
            InventoryService::with_config(InMemoryProductRepository::new(), config.inventory);
        Self { config, service }
    }
}
