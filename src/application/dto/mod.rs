// src/application/dto/mod.rs
// Read-only aggregates computed on demand

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    /// Products whose combined stock is above zero and below the low-stock threshold
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    /// Σ price × combined stock
    pub total_value: Decimal,
    /// Distinct categories in first-seen order
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub confirmed_orders: usize,
    pub total_amount: Decimal,
    /// Orders created on the current UTC calendar day
    pub today_orders: usize,
}
