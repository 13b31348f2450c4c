// src/domain/errors.rs
use thiserror::Error;

use crate::domain::model::OrderStatus;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the key-value backend itself. Absence of a record is never
/// reported through this type.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("{0}")]
    Validation(String),

    #[error("A product with code {0} already exists")]
    DuplicateCode(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock. Current stock: {current}, requested quantity: {requested}")]
    InsufficientStock { current: i64, requested: i64 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order {id} is {status} and can no longer be modified")]
    TerminalState { id: String, status: OrderStatus },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type StorageResult<T> = Result<T, StorageError>;
pub type InventoryResult<T> = Result<T, InventoryError>;
pub type OrderResult<T> = Result<T, OrderError>;
