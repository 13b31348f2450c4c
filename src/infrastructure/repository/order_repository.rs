// src/infrastructure/repository/order_repository.rs
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::collection::JsonCollection;
use crate::domain::errors::StorageResult;
use crate::domain::model::{total_amount, NewOrder, Order, OrderStatus, UpdateOrderDto};
use crate::domain::repository::OrderRepository;
use crate::infrastructure::storage::KeyValueStore;

pub const ORDERS_KEY: &str = "iwa_orders";

/// Orders persisted as a single JSON array. Starts empty.
pub struct LocalStorageOrderRepository {
    collection: JsonCollection<Order>,
}

impl LocalStorageOrderRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: JsonCollection::new(store, ORDERS_KEY),
        }
    }

    fn generate_id() -> String {
        format!("order_{}", Uuid::new_v4().simple())
    }

    async fn orders(&self) -> StorageResult<Vec<Order>> {
        Ok(self.collection.load().await?.unwrap_or_default())
    }
}

#[async_trait]
impl OrderRepository for LocalStorageOrderRepository {
    async fn get_all(&self) -> StorageResult<Vec<Order>> {
        self.orders().await
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Order>> {
        let orders = self.orders().await?;
        Ok(orders.into_iter().find(|o| o.id == id))
    }

    async fn get_by_client_id(&self, client_id: &str) -> StorageResult<Vec<Order>> {
        let mut orders = self.orders().await?;
        orders.retain(|o| o.client_id == client_id);
        Ok(orders)
    }

    async fn create(&self, new_order: NewOrder) -> StorageResult<Order> {
        let _guard = self.collection.lock().await;
        let mut orders = self.orders().await?;
        let now = Utc::now();

        let order = Order {
            id: Self::generate_id(),
            client_id: new_order.client_id,
            client_name: new_order.client_name,
            total_amount: total_amount(&new_order.items),
            items: new_order.items,
            status: OrderStatus::Pending,
            scheduled_date: new_order.scheduled_date,
            notes: new_order.notes,
            created_at: now,
            updated_at: now,
        };

        orders.push(order.clone());
        self.collection.save(&orders).await?;
        log::info!(
            "Created order {} for client {} (total {})",
            order.id,
            order.client_id,
            order.total_amount
        );
        Ok(order)
    }

    async fn update(&self, id: &str, dto: UpdateOrderDto) -> StorageResult<Option<Order>> {
        let _guard = self.collection.lock().await;
        let mut orders = self.orders().await?;

        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.apply(dto, Utc::now());
        let updated = order.clone();

        self.collection.save(&orders).await?;
        log::debug!("Updated order {} (status {})", id, updated.status);
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let _guard = self.collection.lock().await;
        let mut orders = self.orders().await?;

        let Some(index) = orders.iter().position(|o| o.id == id) else {
            return Ok(false);
        };
        orders.remove(index);

        self.collection.save(&orders).await?;
        log::info!("Deleted order {}", id);
        Ok(true)
    }
}
