// src/domain/model/order.rs
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Cancelled and delivered orders reject general field edits.
    pub fn is_terminal(&self) -> bool {
        match self {
            OrderStatus::Cancelled | OrderStatus::Delivered => true,
            OrderStatus::Pending | OrderStatus::Confirmed => false,
        }
    }

    /// Next step on the forward delivery path, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ordered line. Name and price are captured at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    /// `quantity * unit_price`, or `None` if it leaves the `Decimal` range
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Sum of `quantity * unit_price` over all lines, or `None` on overflow.
pub fn checked_total_amount(items: &[OrderItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal()?))
}

/// Line total clamped to `Decimal::MAX`. The order service rejects lines
/// whose total does not fit before they reach storage.
pub fn total_amount(items: &[OrderItem]) -> Decimal {
    checked_total_amount(items).unwrap_or(Decimal::MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Merge the provided fields, recomputing the total only when lines change.
    pub fn apply(&mut self, dto: UpdateOrderDto, now: DateTime<Utc>) {
        if let Some(items) = dto.items {
            self.total_amount = total_amount(&items);
            self.items = items;
        }
        if let Some(status) = dto.status {
            self.status = status;
        }
        if let Some(date) = dto.scheduled_date {
            self.scheduled_date = date;
        }
        if let Some(notes) = dto.notes {
            self.notes = notes;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub client_id: String,
    pub client_name: String,
    pub items: Vec<OrderItem>,
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Order input that passed validation, as handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub client_id: String,
    pub client_name: String,
    pub items: Vec<OrderItem>,
    pub scheduled_date: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    pub items: Option<Vec<OrderItem>>,
    pub status: Option<OrderStatus>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateOrderDto {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
