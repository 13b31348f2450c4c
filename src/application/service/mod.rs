// src/application/service/mod.rs
// Application services

mod order_service;
mod product_service;

pub use order_service::{OrderService, OrderServiceImpl};
pub use product_service::{compare_names, ProductService, ProductServiceImpl};
