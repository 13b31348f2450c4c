// src/adapter/container.rs
// Explicit wiring of repositories and services

use std::sync::Arc;

use crate::application::service::{
    OrderService, OrderServiceImpl, ProductService, ProductServiceImpl,
};
use crate::config::{StorageBackend, StorageConfig};
use crate::domain::errors::AppResult;
use crate::domain::repository::ClientRepository;
use crate::infrastructure::repository::{
    LocalStorageOrderRepository, LocalStorageProductRepository, StaticClientRepository,
};
use crate::infrastructure::storage::{FileStore, KeyValueStore, MemoryStore};

/// Every service the application needs, constructed once and handed to callers.
///
/// Build a new container to start from a clean slate; nothing here is global.
#[derive(Clone)]
pub struct AppContainer {
    product_service: Arc<dyn ProductService>,
    order_service: Arc<dyn OrderService>,
    client_repository: Arc<dyn ClientRepository>,
}

impl AppContainer {
    /// Wire local-storage repositories over `store`
    pub fn new(store: Arc<dyn KeyValueStore>, seed_catalog: bool) -> Self {
        let product_repository = Arc::new(
            LocalStorageProductRepository::new(store.clone()).with_seed_catalog(seed_catalog),
        );
        let order_repository = Arc::new(LocalStorageOrderRepository::new(store));

        Self {
            product_service: Arc::new(ProductServiceImpl::new(product_repository)),
            order_service: Arc::new(OrderServiceImpl::new(order_repository)),
            client_repository: Arc::new(StaticClientRepository::default()),
        }
    }

    /// Fresh memory-backed container with the default catalog
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), true)
    }

    /// Container for the configured storage backend
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::Memory => {
                log::info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
            StorageBackend::File => {
                let store = FileStore::open(&config.data_dir).await?;
                log::info!("Using file storage at {}", store.root().display());
                Arc::new(store)
            }
        };
        log::debug!("Seed catalog: {}", config.seed_catalog);
        Ok(Self::new(store, config.seed_catalog))
    }

    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    pub fn order_service(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    pub fn client_repository(&self) -> Arc<dyn ClientRepository> {
        self.client_repository.clone()
    }
}
