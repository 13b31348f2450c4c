// src/domain/model/mod.rs
// Core domain models

mod client;
mod order;
mod product;

pub use client::Client;
pub use order::{
    checked_total_amount, total_amount, CreateOrderDto, NewOrder, Order, OrderItem, OrderStatus,
    UpdateOrderDto,
};
pub use product::{
    CreateProductDto, InventoryLocation, Product, StockStatus, UnitType, UpdateProductDto,
    LOW_STOCK_THRESHOLD, MAX_PRICE, MAX_STOCK,
};
