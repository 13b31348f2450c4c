// src/domain/mod.rs
pub mod errors;
pub mod model;
pub mod repository;

// Re-export common types for convenience
pub use errors::{
    AppError, AppResult, InventoryError, InventoryResult, OrderError, OrderResult, StorageError,
    StorageResult,
};
pub use model::{
    Client, CreateOrderDto, CreateProductDto, InventoryLocation, NewOrder, Order, OrderItem,
    OrderStatus, Product, StockStatus, UnitType, UpdateOrderDto, UpdateProductDto,
};
