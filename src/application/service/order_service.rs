// src/application/service/order_service.rs
// Order business rules on top of an OrderRepository

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::application::dto::OrdersSummary;
use crate::domain::errors::{OrderError, OrderResult};
use crate::domain::model::{
    checked_total_amount, CreateOrderDto, NewOrder, Order, OrderItem, OrderStatus,
    UpdateOrderDto, MAX_PRICE,
};
use crate::domain::repository::OrderRepository;

#[async_trait]
pub trait OrderService: Send + Sync {
    /// All orders, most recently created first
    async fn get_all_orders(&self) -> OrderResult<Vec<Order>>;

    async fn get_order_by_id(&self, id: &str) -> OrderResult<Option<Order>>;
    async fn get_orders_by_client(&self, client_id: &str) -> OrderResult<Vec<Order>>;
    async fn create_order(&self, dto: CreateOrderDto) -> OrderResult<Order>;

    /// General edit; cancelled and delivered orders are rejected
    async fn update_order(&self, id: &str, dto: UpdateOrderDto) -> OrderResult<Order>;

    /// Write `status` regardless of the current one
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> OrderResult<Order>;

    async fn cancel_order(&self, id: &str) -> OrderResult<Order>;

    /// Move one step along pending -> confirmed -> delivered
    async fn advance_order_status(&self, id: &str) -> OrderResult<Order>;

    /// Remove the order whatever its status
    async fn delete_order(&self, id: &str) -> OrderResult<bool>;

    async fn get_orders_summary(&self) -> OrderResult<OrdersSummary>;
}

pub struct OrderServiceImpl {
    order_repository: Arc<dyn OrderRepository>,
}

impl OrderServiceImpl {
    pub fn new(order_repository: Arc<dyn OrderRepository>) -> Self {
        Self { order_repository }
    }

    async fn require(&self, id: &str) -> OrderResult<Order> {
        self.order_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    fn validate_create(dto: CreateOrderDto) -> OrderResult<NewOrder> {
        if dto.items.is_empty() {
            return Err(OrderError::Validation(format!(
                "An order must contain at least one product (received: {})",
                dto.items.len()
            )));
        }
        if dto.client_id.trim().is_empty() {
            return Err(OrderError::Validation("A client must be selected".into()));
        }
        if dto.client_name.trim().is_empty() {
            return Err(OrderError::Validation("The client name is required".into()));
        }
        let Some(scheduled_date) = dto.scheduled_date else {
            return Err(OrderError::Validation("A delivery date must be selected".into()));
        };
        Self::validate_lines(&dto.items)?;

        Ok(NewOrder {
            client_id: dto.client_id,
            client_name: dto.client_name,
            items: dto.items,
            scheduled_date,
            notes: dto.notes.unwrap_or_default(),
        })
    }

    fn validate_lines(items: &[OrderItem]) -> OrderResult<()> {
        for item in items {
            if item.unit_price < Decimal::ZERO {
                return Err(OrderError::Validation(format!(
                    "Unit price of {} cannot be negative",
                    item.product_id
                )));
            }
            if item.unit_price > Decimal::from(MAX_PRICE) {
                return Err(OrderError::Validation(format!(
                    "Unit price of {} cannot exceed {}",
                    item.product_id, MAX_PRICE
                )));
            }
        }
        if checked_total_amount(items).is_none() {
            return Err(OrderError::Validation("Order total is out of range".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn get_all_orders(&self) -> OrderResult<Vec<Order>> {
        let mut orders = self.order_repository.get_all().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn get_order_by_id(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.order_repository.get_by_id(id).await?)
    }

    async fn get_orders_by_client(&self, client_id: &str) -> OrderResult<Vec<Order>> {
        Ok(self.order_repository.get_by_client_id(client_id).await?)
    }

    async fn create_order(&self, dto: CreateOrderDto) -> OrderResult<Order> {
        let client_id = dto.client_id.clone();
        let new_order = match Self::validate_create(dto) {
            Ok(new_order) => new_order,
            Err(e) => {
                log::warn!("Rejected order for client {:?}: {}", client_id, e);
                return Err(e);
            }
        };
        Ok(self.order_repository.create(new_order).await?)
    }

    async fn update_order(&self, id: &str, dto: UpdateOrderDto) -> OrderResult<Order> {
        let existing = self.require(id).await?;
        if existing.status.is_terminal() {
            log::warn!("Rejected edit of {} order {}", existing.status, id);
            return Err(OrderError::TerminalState {
                id: id.to_string(),
                status: existing.status,
            });
        }
        if let Some(items) = &dto.items {
            Self::validate_lines(items)?;
        }

        self.order_repository
            .update(id, dto)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> OrderResult<Order> {
        let existing = self.require(id).await?;
        log::info!("Order {}: {} -> {}", id, existing.status, status);

        self.order_repository
            .update(id, UpdateOrderDto::status(status))
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn cancel_order(&self, id: &str) -> OrderResult<Order> {
        self.update_order_status(id, OrderStatus::Cancelled).await
    }

    async fn advance_order_status(&self, id: &str) -> OrderResult<Order> {
        let existing = self.require(id).await?;
        let next = existing.status.next().ok_or_else(|| {
            OrderError::Validation(format!(
                "Order {} is {} and has no next status",
                id, existing.status
            ))
        })?;
        self.update_order_status(id, next).await
    }

    async fn delete_order(&self, id: &str) -> OrderResult<bool> {
        Ok(self.order_repository.delete(id).await?)
    }

    async fn get_orders_summary(&self) -> OrderResult<OrdersSummary> {
        let orders = self.order_repository.get_all().await?;
        let today = Utc::now().date_naive();
        let count_status = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        Ok(OrdersSummary {
            total_orders: orders.len(),
            pending_orders: count_status(OrderStatus::Pending),
            confirmed_orders: count_status(OrderStatus::Confirmed),
            total_amount: orders
                .iter()
                .fold(Decimal::ZERO, |total, o| total.saturating_add(o.total_amount)),
            today_orders: orders
                .iter()
                .filter(|o| o.created_at.date_naive() == today)
                .count(),
        })
    }
}
