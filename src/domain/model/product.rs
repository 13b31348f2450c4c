// src/domain/model/product.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantities strictly below this (and above zero) are reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 20;

/// Largest quantity a single location may hold.
pub const MAX_STOCK: i64 = 1_000_000_000;

/// Largest accepted unit price, in whole currency units.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Stock-holding context for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLocation {
    /// Central stock
    Warehouse,
    /// Stock loaded on the vehicle for field delivery
    Route,
}

impl fmt::Display for InventoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InventoryLocation::Warehouse => write!(f, "warehouse"),
            InventoryLocation::Route => write!(f, "route"),
        }
    }
}

/// Unit of sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "pz")]
    Piece,
    #[serde(rename = "paq")]
    Pack,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lt")]
    Liter,
    #[serde(rename = "caja")]
    Box,
    #[serde(rename = "bolsa")]
    Bag,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Piece => "pz",
            UnitType::Pack => "paq",
            UnitType::Kilogram => "kg",
            UnitType::Liter => "lt",
            UnitType::Box => "caja",
            UnitType::Bag => "bolsa",
        }
    }

    /// Units sold as a container of several pieces carry a pack quantity.
    pub fn is_container(&self) -> bool {
        matches!(self, UnitType::Pack | UnitType::Box)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Available,
    Low,
    OutOfStock,
}

impl StockStatus {
    /// Classify a quantity against [`LOW_STOCK_THRESHOLD`].
    pub fn classify(stock: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock < LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Available
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StockStatus::Available => write!(f, "available"),
            StockStatus::Low => write!(f, "low"),
            StockStatus::OutOfStock => write!(f, "out_of_stock"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    pub stock_warehouse: i64,
    pub stock_route: i64,
    pub price: Decimal,
    pub category: String,
    pub unit_type: UnitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_quantity: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn stock_at(&self, location: InventoryLocation) -> i64 {
        match location {
            InventoryLocation::Warehouse => self.stock_warehouse,
            InventoryLocation::Route => self.stock_route,
        }
    }

    /// Combined on-hand stock across both locations
    pub fn total_stock(&self) -> i64 {
        self.stock_warehouse.saturating_add(self.stock_route)
    }

    pub fn is_present_at(&self, location: InventoryLocation) -> bool {
        self.stock_at(location) > 0
    }

    pub fn stock_status_at(&self, location: InventoryLocation) -> StockStatus {
        StockStatus::classify(self.stock_at(location))
    }

    /// Case-insensitive substring match on name, code and category.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.code.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }

    /// Merge the provided fields and refresh `updated_at`.
    pub fn apply(&mut self, dto: UpdateProductDto, now: DateTime<Utc>) {
        if let Some(name) = dto.name {
            self.name = name;
        }
        if let Some(code) = dto.code {
            self.code = code;
        }
        if let Some(stock) = dto.stock_warehouse {
            self.stock_warehouse = stock;
        }
        if let Some(stock) = dto.stock_route {
            self.stock_route = stock;
        }
        if let Some(price) = dto.price {
            self.price = price;
        }
        if let Some(category) = dto.category {
            self.category = category;
        }
        if let Some(unit_type) = dto.unit_type {
            self.unit_type = unit_type;
            if !unit_type.is_container() {
                self.pack_quantity = None;
            }
        }
        if dto.pack_quantity.is_some() {
            self.pack_quantity = dto.pack_quantity;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    pub name: String,
    pub code: String,
    pub stock_warehouse: i64,
    pub stock_route: i64,
    pub price: Decimal,
    pub category: String,
    pub unit_type: UnitType,
    #[serde(default)]
    pub pack_quantity: Option<u32>,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub code: Option<String>,
    pub stock_warehouse: Option<i64>,
    pub stock_route: Option<i64>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub unit_type: Option<UnitType>,
    pub pack_quantity: Option<u32>,
}

impl UpdateProductDto {
    /// Patch that sets the stock of a single location.
    pub fn stock(location: InventoryLocation, stock: i64) -> Self {
        match location {
            InventoryLocation::Warehouse => Self {
                stock_warehouse: Some(stock),
                ..Self::default()
            },
            InventoryLocation::Route => Self {
                stock_route: Some(stock),
                ..Self::default()
            },
        }
    }
}
