// src/domain/repository/mod.rs
// Repository interfaces for domain entities.
//
// Absence is reported with `None`/`false`; `StorageError` is reserved for
// backend failures.

use async_trait::async_trait;

use crate::domain::errors::StorageResult;
use crate::domain::model::{
    Client, CreateProductDto, InventoryLocation, NewOrder, Order, Product, UpdateOrderDto,
    UpdateProductDto,
};

/// Outcome of a product update whose code is checked under the collection lock
#[derive(Debug, Clone, PartialEq)]
pub enum ProductWrite {
    Written(Product),
    NotFound,
    /// Another product already uses this code
    CodeTaken(String),
}

/// Outcome of a relative stock change
#[derive(Debug, Clone, PartialEq)]
pub enum StockAdjustment {
    Adjusted(Product),
    NotFound,
    /// The change would leave the location below zero
    Insufficient { current: i64 },
    /// The result would exceed [`crate::domain::model::MAX_STOCK`]
    OutOfRange,
}

/// Repository interface for the product catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in persisted order
    async fn get_all(&self) -> StorageResult<Vec<Product>>;
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Product>>;
    async fn get_by_code(&self, code: &str) -> StorageResult<Option<Product>>;
    async fn get_by_category(&self, category: &str) -> StorageResult<Vec<Product>>;

    /// Products with a positive stock at `location`
    async fn get_by_location(&self, location: InventoryLocation) -> StorageResult<Vec<Product>>;

    async fn search(&self, query: &str) -> StorageResult<Vec<Product>>;
    async fn create(&self, dto: CreateProductDto) -> StorageResult<Product>;
    async fn update(&self, id: &str, dto: UpdateProductDto) -> StorageResult<Option<Product>>;
    async fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Create unless another product holds `dto.code`, which yields `None`
    async fn create_unique(&self, dto: CreateProductDto) -> StorageResult<Option<Product>>;

    /// Update unless the patched code belongs to a different product
    async fn update_unique(&self, id: &str, dto: UpdateProductDto) -> StorageResult<ProductWrite>;

    /// Add `delta` to the stock at `location` in a single read-modify-write
    async fn adjust_stock(
        &self,
        id: &str,
        location: InventoryLocation,
        delta: i64,
    ) -> StorageResult<StockAdjustment>;
}

/// Repository interface for orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_all(&self) -> StorageResult<Vec<Order>>;
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Order>>;
    async fn get_by_client_id(&self, client_id: &str) -> StorageResult<Vec<Order>>;

    /// Stores a new order in `pending` status with its total computed from the lines
    async fn create(&self, order: NewOrder) -> StorageResult<Order>;

    async fn update(&self, id: &str, dto: UpdateOrderDto) -> StorageResult<Option<Order>>;
    async fn delete(&self, id: &str) -> StorageResult<bool>;
}

/// Read-only client directory
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_all(&self) -> StorageResult<Vec<Client>>;
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Client>>;
    async fn search(&self, query: &str) -> StorageResult<Vec<Client>>;
}
