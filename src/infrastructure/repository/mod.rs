// src/infrastructure/repository/mod.rs
// Repository implementations backed by local key-value storage

mod client_repository;
mod collection;
mod order_repository;
mod product_repository;

pub use client_repository::StaticClientRepository;
pub use order_repository::{LocalStorageOrderRepository, ORDERS_KEY};
pub use product_repository::{LocalStorageProductRepository, PRODUCTS_KEY};
