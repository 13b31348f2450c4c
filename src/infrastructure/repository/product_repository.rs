// src/infrastructure/repository/product_repository.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use super::collection::JsonCollection;
use crate::domain::errors::StorageResult;
use crate::domain::model::{
    CreateProductDto, InventoryLocation, Product, UnitType, UpdateProductDto, MAX_STOCK,
};
use crate::domain::repository::{ProductRepository, ProductWrite, StockAdjustment};
use crate::infrastructure::storage::KeyValueStore;

pub const PRODUCTS_KEY: &str = "iwa_products";

/// Product catalog persisted as a single JSON array in a [`KeyValueStore`].
pub struct LocalStorageProductRepository {
    collection: JsonCollection<Product>,
    seed_catalog: bool,
}

impl LocalStorageProductRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: JsonCollection::new(store, PRODUCTS_KEY),
            seed_catalog: true,
        }
    }

    /// Whether an absent catalog is populated with [`default_catalog`] on first read
    pub fn with_seed_catalog(mut self, seed_catalog: bool) -> Self {
        self.seed_catalog = seed_catalog;
        self
    }

    fn generate_id() -> String {
        format!("product_{}", Uuid::new_v4().simple())
    }

    async fn products(&self) -> StorageResult<Vec<Product>> {
        if let Some(products) = self.collection.load().await? {
            return Ok(products);
        }
        let _guard = self.collection.lock().await;
        self.products_locked().await
    }

    /// Caller must hold the collection lock.
    async fn products_locked(&self) -> StorageResult<Vec<Product>> {
        if let Some(products) = self.collection.load().await? {
            return Ok(products);
        }
        if !self.seed_catalog {
            return Ok(Vec::new());
        }

        let defaults = default_catalog(Utc::now());
        self.collection.save(&defaults).await?;
        log::info!(
            "Seeded {} default products into {}",
            defaults.len(),
            self.collection.key()
        );
        Ok(defaults)
    }

    /// Caller must hold the collection lock.
    async fn append(
        &self,
        products: &mut Vec<Product>,
        dto: CreateProductDto,
    ) -> StorageResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Self::generate_id(),
            name: dto.name,
            code: dto.code,
            stock_warehouse: dto.stock_warehouse,
            stock_route: dto.stock_route,
            price: dto.price,
            category: dto.category,
            unit_type: dto.unit_type,
            pack_quantity: dto.pack_quantity,
            created_at: now,
            updated_at: now,
        };

        products.push(product.clone());
        self.collection.save(products).await?;
        log::info!("Created product {} ({})", product.id, product.code);
        Ok(product)
    }

    /// Caller must hold the collection lock.
    async fn patch(
        &self,
        products: &mut [Product],
        id: &str,
        dto: UpdateProductDto,
    ) -> StorageResult<Option<Product>> {
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply(dto, Utc::now());
        let updated = product.clone();

        self.collection.save(products).await?;
        log::debug!("Updated product {}", id);
        Ok(Some(updated))
    }
}

#[async_trait]
impl ProductRepository for LocalStorageProductRepository {
    async fn get_all(&self) -> StorageResult<Vec<Product>> {
        self.products().await
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Product>> {
        let products = self.products().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    async fn get_by_code(&self, code: &str) -> StorageResult<Option<Product>> {
        let products = self.products().await?;
        Ok(products.into_iter().find(|p| p.code == code))
    }

    async fn get_by_category(&self, category: &str) -> StorageResult<Vec<Product>> {
        let mut products = self.products().await?;
        products.retain(|p| p.category == category);
        Ok(products)
    }

    async fn get_by_location(&self, location: InventoryLocation) -> StorageResult<Vec<Product>> {
        let mut products = self.products().await?;
        products.retain(|p| p.is_present_at(location));
        Ok(products)
    }

    async fn search(&self, query: &str) -> StorageResult<Vec<Product>> {
        let mut products = self.products().await?;
        products.retain(|p| p.matches(query));
        Ok(products)
    }

    async fn create(&self, dto: CreateProductDto) -> StorageResult<Product> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;
        self.append(&mut products, dto).await
    }

    async fn update(&self, id: &str, dto: UpdateProductDto) -> StorageResult<Option<Product>> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;
        self.patch(&mut products, id, dto).await
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;

        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        products.remove(index);

        self.collection.save(&products).await?;
        log::info!("Deleted product {}", id);
        Ok(true)
    }

    async fn create_unique(&self, dto: CreateProductDto) -> StorageResult<Option<Product>> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;

        if products.iter().any(|p| p.code == dto.code) {
            return Ok(None);
        }
        self.append(&mut products, dto).await.map(Some)
    }

    async fn update_unique(&self, id: &str, dto: UpdateProductDto) -> StorageResult<ProductWrite> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;

        if !products.iter().any(|p| p.id == id) {
            return Ok(ProductWrite::NotFound);
        }
        if let Some(code) = dto.code.as_deref() {
            if products.iter().any(|p| p.code == code && p.id != id) {
                return Ok(ProductWrite::CodeTaken(code.to_string()));
            }
        }

        Ok(match self.patch(&mut products, id, dto).await? {
            Some(product) => ProductWrite::Written(product),
            None => ProductWrite::NotFound,
        })
    }

    async fn adjust_stock(
        &self,
        id: &str,
        location: InventoryLocation,
        delta: i64,
    ) -> StorageResult<StockAdjustment> {
        let _guard = self.collection.lock().await;
        let mut products = self.products_locked().await?;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(StockAdjustment::NotFound);
        };
        let current = product.stock_at(location);
        let stock = match current.checked_add(delta) {
            Some(stock) if stock < 0 => return Ok(StockAdjustment::Insufficient { current }),
            Some(stock) if stock <= MAX_STOCK => stock,
            _ => return Ok(StockAdjustment::OutOfRange),
        };
        product.apply(UpdateProductDto::stock(location, stock), Utc::now());
        let updated = product.clone();

        self.collection.save(&products).await?;
        log::info!(
            "Stock for {} at {}: {} -> {}",
            updated.code,
            location,
            current,
            stock
        );
        Ok(StockAdjustment::Adjusted(updated))
    }
}

/// Catalog written the first time an empty store is read.
pub fn default_catalog(now: DateTime<Utc>) -> Vec<Product> {
    let product = |n: u32,
                   name: &str,
                   stock_warehouse: i64,
                   stock_route: i64,
                   price: Decimal,
                   category: &str,
                   unit_type: UnitType| Product {
        id: format!("product_{}", n),
        name: name.to_string(),
        code: format!("SKU-{:03}", n),
        stock_warehouse,
        stock_route,
        price,
        category: category.to_string(),
        unit_type,
        pack_quantity: match unit_type {
            UnitType::Pack | UnitType::Box => Some(12),
            _ => None,
        },
        created_at: now,
        updated_at: now,
    };

    vec![
        product(1, "Producto A", 150, 30, dec!(25.50), "Categoría 1", UnitType::Piece),
        product(2, "Producto B", 85, 10, dec!(42.00), "Categoría 2", UnitType::Pack),
        product(3, "Producto C", 220, 0, dec!(18.75), "Categoría 1", UnitType::Kilogram),
        product(4, "Producto D", 12, 5, dec!(95.00), "Categoría 3", UnitType::Box),
        product(5, "Producto E", 0, 0, dec!(33.25), "Categoría 2", UnitType::Liter),
    ]
}
