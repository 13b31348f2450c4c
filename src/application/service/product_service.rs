// src/application/service/product_service.rs
// Inventory business rules on top of a ProductRepository

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::application::dto::InventorySummary;
use crate::domain::errors::{InventoryError, InventoryResult};
use crate::domain::model::{
    CreateProductDto, InventoryLocation, Product, StockStatus, UpdateProductDto, MAX_PRICE,
    MAX_STOCK,
};
use crate::domain::repository::{ProductRepository, ProductWrite, StockAdjustment};

#[async_trait]
pub trait ProductService: Send + Sync {
    /// All products sorted by name
    async fn get_all_products(&self) -> InventoryResult<Vec<Product>>;

    async fn get_product_by_id(&self, id: &str) -> InventoryResult<Option<Product>>;
    async fn get_product_by_code(&self, code: &str) -> InventoryResult<Option<Product>>;
    async fn get_products_by_category(&self, category: &str) -> InventoryResult<Vec<Product>>;

    /// Products with stock at `location`, sorted by name
    async fn get_products_by_location(
        &self,
        location: InventoryLocation,
    ) -> InventoryResult<Vec<Product>>;

    /// Full-text search, optionally narrowed to one location. A blank query
    /// lists everything in scope instead of matching nothing.
    async fn search_products(
        &self,
        query: &str,
        location: Option<InventoryLocation>,
    ) -> InventoryResult<Vec<Product>>;

    async fn create_product(&self, dto: CreateProductDto) -> InventoryResult<Product>;
    async fn update_product(&self, id: &str, dto: UpdateProductDto) -> InventoryResult<Product>;

    /// Apply `delta` to the warehouse stock
    async fn update_stock(&self, id: &str, delta: i64) -> InventoryResult<Product>;

    /// Apply `delta` to the stock held at `location`
    async fn update_stock_at(
        &self,
        id: &str,
        location: InventoryLocation,
        delta: i64,
    ) -> InventoryResult<Product>;

    async fn delete_product(&self, id: &str) -> InventoryResult<bool>;
    async fn get_inventory_summary(&self) -> InventoryResult<InventorySummary>;

    fn get_stock_status(&self, stock: i64) -> StockStatus {
        StockStatus::classify(stock)
    }
}

pub struct ProductServiceImpl {
    product_repository: Arc<dyn ProductRepository>,
}

impl ProductServiceImpl {
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
        Self { product_repository }
    }

    async fn require(&self, id: &str) -> InventoryResult<Product> {
        self.product_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    fn validate_create(dto: &CreateProductDto) -> InventoryResult<()> {
        if dto.name.trim().is_empty() {
            return Err(InventoryError::Validation("Product name is required".into()));
        }
        if dto.code.trim().is_empty() {
            return Err(InventoryError::Validation("Product code is required".into()));
        }
        validate_price(dto.price)?;
        validate_stock([dto.stock_warehouse, dto.stock_route])?;
        validate_pack_quantity(dto.pack_quantity)
    }

    fn validate_update(dto: &UpdateProductDto) -> InventoryResult<()> {
        if let Some(price) = dto.price {
            validate_price(price)?;
        }
        validate_stock([dto.stock_warehouse, dto.stock_route].into_iter().flatten())?;
        validate_pack_quantity(dto.pack_quantity)
    }
}

fn validate_price(price: Decimal) -> InventoryResult<()> {
    if price < Decimal::ZERO {
        return Err(InventoryError::Validation("Price cannot be negative".into()));
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(InventoryError::Validation(format!(
            "Price cannot exceed {}",
            MAX_PRICE
        )));
    }
    Ok(())
}

fn validate_stock(stocks: impl IntoIterator<Item = i64>) -> InventoryResult<()> {
    for stock in stocks {
        if stock < 0 {
            return Err(InventoryError::Validation("Stock cannot be negative".into()));
        }
        if stock > MAX_STOCK {
            return Err(InventoryError::Validation(format!(
                "Stock cannot exceed {}",
                MAX_STOCK
            )));
        }
    }
    Ok(())
}

fn validate_pack_quantity(pack_quantity: Option<u32>) -> InventoryResult<()> {
    if pack_quantity == Some(0) {
        return Err(InventoryError::Validation(
            "Pack quantity must be greater than zero".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn get_all_products(&self) -> InventoryResult<Vec<Product>> {
        let mut products = self.product_repository.get_all().await?;
        sort_by_name(&mut products);
        Ok(products)
    }

    async fn get_product_by_id(&self, id: &str) -> InventoryResult<Option<Product>> {
        Ok(self.product_repository.get_by_id(id).await?)
    }

    async fn get_product_by_code(&self, code: &str) -> InventoryResult<Option<Product>> {
        Ok(self.product_repository.get_by_code(code).await?)
    }

    async fn get_products_by_category(&self, category: &str) -> InventoryResult<Vec<Product>> {
        Ok(self.product_repository.get_by_category(category).await?)
    }

    async fn get_products_by_location(
        &self,
        location: InventoryLocation,
    ) -> InventoryResult<Vec<Product>> {
        let mut products = self.product_repository.get_by_location(location).await?;
        sort_by_name(&mut products);
        Ok(products)
    }

    async fn search_products(
        &self,
        query: &str,
        location: Option<InventoryLocation>,
    ) -> InventoryResult<Vec<Product>> {
        let mut products = if query.trim().is_empty() {
            match location {
                Some(location) => self.product_repository.get_by_location(location).await?,
                None => self.product_repository.get_all().await?,
            }
        } else {
            let mut results = self.product_repository.search(query).await?;
            if let Some(location) = location {
                results.retain(|p| p.is_present_at(location));
            }
            results
        };
        sort_by_name(&mut products);
        Ok(products)
    }

    async fn create_product(&self, dto: CreateProductDto) -> InventoryResult<Product> {
        if let Err(e) = Self::validate_create(&dto) {
            log::warn!("Rejected product {:?}: {}", dto.code, e);
            return Err(e);
        }

        let code = dto.code.clone();
        match self.product_repository.create_unique(dto).await? {
            Some(product) => Ok(product),
            None => {
                log::warn!("Rejected product: code {} already in use", code);
                Err(InventoryError::DuplicateCode(code))
            }
        }
    }

    async fn update_product(&self, id: &str, dto: UpdateProductDto) -> InventoryResult<Product> {
        let existing = self.require(id).await?;

        // Conflicts are reported ahead of field validation; the write checks again.
        if let Some(code) = dto.code.as_deref() {
            if code != existing.code {
                if let Some(other) = self.product_repository.get_by_code(code).await? {
                    if other.id != existing.id {
                        log::warn!("Rejected update of {}: code {} already in use", id, code);
                        return Err(InventoryError::DuplicateCode(code.to_string()));
                    }
                }
            }
        }

        Self::validate_update(&dto)?;

        match self.product_repository.update_unique(id, dto).await? {
            ProductWrite::Written(product) => Ok(product),
            ProductWrite::NotFound => Err(InventoryError::NotFound(id.to_string())),
            ProductWrite::CodeTaken(code) => {
                log::warn!("Rejected update of {}: code {} already in use", id, code);
                Err(InventoryError::DuplicateCode(code))
            }
        }
    }

    async fn update_stock(&self, id: &str, delta: i64) -> InventoryResult<Product> {
        self.update_stock_at(id, InventoryLocation::Warehouse, delta)
            .await
    }

    async fn update_stock_at(
        &self,
        id: &str,
        location: InventoryLocation,
        delta: i64,
    ) -> InventoryResult<Product> {
        match self
            .product_repository
            .adjust_stock(id, location, delta)
            .await?
        {
            StockAdjustment::Adjusted(product) => Ok(product),
            StockAdjustment::NotFound => Err(InventoryError::NotFound(id.to_string())),
            StockAdjustment::Insufficient { current } => {
                log::warn!(
                    "Rejected stock adjustment of {} for {} at {}: only {} available",
                    delta,
                    id,
                    location,
                    current
                );
                Err(InventoryError::InsufficientStock {
                    current,
                    requested: delta.saturating_abs(),
                })
            }
            StockAdjustment::OutOfRange => Err(InventoryError::Validation(format!(
                "Stock adjustment of {} is out of range",
                delta
            ))),
        }
    }

    async fn delete_product(&self, id: &str) -> InventoryResult<bool> {
        self.require(id).await?;
        Ok(self.product_repository.delete(id).await?)
    }

    async fn get_inventory_summary(&self) -> InventoryResult<InventorySummary> {
        let products = self.product_repository.get_all().await?;

        let mut categories: Vec<String> = Vec::new();
        for product in &products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        let count_status = |status: StockStatus| {
            products
                .iter()
                .filter(|p| StockStatus::classify(p.total_stock()) == status)
                .count()
        };

        Ok(InventorySummary {
            total_products: products.len(),
            low_stock_products: count_status(StockStatus::Low),
            out_of_stock_products: count_status(StockStatus::OutOfStock),
            total_value: products.iter().fold(Decimal::ZERO, |total, p| {
                total.saturating_add(p.price.saturating_mul(Decimal::from(p.total_stock())))
            }),
            categories,
        })
    }
}

/// Order names the way a person reads them: case and accents only break ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| compare_names(&a.name, &b.name));
}

fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UnitType;
    use crate::infrastructure::repository::LocalStorageProductRepository;
    use crate::infrastructure::storage::{FileStore, MemoryStore};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn repository() -> Arc<LocalStorageProductRepository> {
        Arc::new(
            LocalStorageProductRepository::new(Arc::new(MemoryStore::new()))
                .with_seed_catalog(false),
        )
    }

    fn service() -> ProductServiceImpl {
        ProductServiceImpl::new(repository())
    }

    fn dto(name: &str, code: &str, stock_warehouse: i64) -> CreateProductDto {
        CreateProductDto {
            name: name.to_string(),
            code: code.to_string(),
            stock_warehouse,
            stock_route: 0,
            price: dec!(5),
            category: "Bebidas".to_string(),
            unit_type: UnitType::Liter,
            pack_quantity: None,
        }
    }

    #[test]
    fn names_compare_ignoring_case_and_accents() {
        let mut names = vec!["zanahoria", "Ñame", "agua", "Árbol", "Naranja"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["agua", "Árbol", "Ñame", "Naranja", "zanahoria"]);
    }

    #[test]
    fn stock_status_boundaries() {
        let service = service();
        assert_eq!(service.get_stock_status(0), StockStatus::OutOfStock);
        assert_eq!(service.get_stock_status(1), StockStatus::Low);
        assert_eq!(service.get_stock_status(19), StockStatus::Low);
        assert_eq!(service.get_stock_status(20), StockStatus::Available);
    }

    #[tokio::test]
    async fn create_validates_fields_in_order() {
        let service = service();

        let mut blank = dto("  ", "", -1);
        blank.price = dec!(-1);
        let err = service.create_product(blank).await.unwrap_err();
        assert_eq!(err.to_string(), "Product name is required");

        let err = service.create_product(dto("Agua", " ", 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product code is required");

        let mut negative_price = dto("Agua", "SKU-1", -1);
        negative_price.price = dec!(-0.01);
        let err = service.create_product(negative_price).await.unwrap_err();
        assert_eq!(err.to_string(), "Price cannot be negative");

        let err = service.create_product(dto("Agua", "SKU-1", -1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Stock cannot be negative");

        let mut route_negative = dto("Agua", "SKU-1", 1);
        route_negative.stock_route = -3;
        assert!(matches!(
            service.create_product(route_negative).await,
            Err(InventoryError::Validation(_))
        ));

        let mut empty_pack = dto("Agua", "SKU-1", 1);
        empty_pack.pack_quantity = Some(0);
        assert!(matches!(
            service.create_product(empty_pack).await,
            Err(InventoryError::Validation(_))
        ));

        assert!(service.get_all_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_magnitudes_beyond_the_supported_range() {
        let service = service();

        let mut pricey = dto("Agua", "SKU-1", 1);
        pricey.price = Decimal::MAX / dec!(10);
        assert!(matches!(
            service.create_product(pricey).await,
            Err(InventoryError::Validation(_))
        ));

        let mut huge_route = dto("Agua", "SKU-1", 1);
        huge_route.stock_route = i64::MAX;
        assert!(matches!(
            service.create_product(huge_route).await,
            Err(InventoryError::Validation(_))
        ));

        let product = service
            .create_product(dto("Agua", "SKU-1", MAX_STOCK))
            .await
            .unwrap();
        let err = service.update_stock(&product.id, 1).await.unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
        let err = service
            .update_product(
                &product.id,
                UpdateProductDto {
                    price: Some(Decimal::from(MAX_PRICE) + Decimal::ONE),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));

        let reloaded = service.get_product_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(reloaded.stock_warehouse, MAX_STOCK);
        assert_eq!(reloaded.price, dec!(5));
    }

    #[tokio::test]
    async fn summary_of_oversized_stored_values_does_not_panic() {
        let repository = repository();
        let mut pricey = dto("Agua", "SKU-1", 1_000_000_000);
        pricey.price = Decimal::MAX / dec!(10);
        repository.create(pricey).await.unwrap();
        let mut overflowing = dto("Jugo", "SKU-2", i64::MAX);
        overflowing.stock_route = 1;
        repository.create(overflowing).await.unwrap();

        let summary = ProductServiceImpl::new(repository)
            .get_inventory_summary()
            .await
            .unwrap();
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.out_of_stock_products, 0);
        assert_eq!(summary.total_value, Decimal::MAX);
    }

    #[tokio::test]
    async fn update_rejects_code_taken_by_another_product() {
        let service = service();
        let first = service.create_product(dto("Agua", "SKU-1", 1)).await.unwrap();
        service.create_product(dto("Jugo", "SKU-2", 1)).await.unwrap();

        let err = service
            .update_product(
                &first.id,
                UpdateProductDto {
                    code: Some("SKU-2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateCode(code) if code == "SKU-2"));

        // Re-submitting the product's own code is not a conflict.
        let same = service
            .update_product(
                &first.id,
                UpdateProductDto {
                    code: Some("SKU-1".to_string()),
                    name: Some("Agua Natural".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.name, "Agua Natural");
    }

    #[tokio::test]
    async fn update_rejects_negative_numbers_and_unknown_ids() {
        let service = service();
        let product = service.create_product(dto("Agua", "SKU-1", 1)).await.unwrap();

        let err = service
            .update_product(
                &product.id,
                UpdateProductDto {
                    stock_route: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));

        let err = service
            .update_product(
                &product.id,
                UpdateProductDto {
                    price: Some(dec!(-2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));

        let err = service
            .update_product("product_missing", UpdateProductDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn stock_adjustments_apply_per_location() {
        let service = service();
        let product = service.create_product(dto("Agua", "SKU-1", 30)).await.unwrap();

        let moved = service.update_stock(&product.id, -12).await.unwrap();
        assert_eq!(moved.stock_warehouse, 18);

        let loaded = service
            .update_stock_at(&product.id, InventoryLocation::Route, 12)
            .await
            .unwrap();
        assert_eq!(loaded.stock_route, 12);
        assert_eq!(loaded.stock_warehouse, 18);

        let err = service
            .update_stock_at(&product.id, InventoryLocation::Route, -13)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InsufficientStock {
                current: 12,
                requested: 13
            }
        ));

        let err = service.update_stock("product_missing", 1).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_stock_adjustments_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let repository =
            LocalStorageProductRepository::new(Arc::new(store)).with_seed_catalog(false);
        let service = Arc::new(ProductServiceImpl::new(Arc::new(repository)));
        let product = service.create_product(dto("Agua", "SKU-1", 0)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let service = service.clone();
            let id = product.id.clone();
            handles.push(tokio::spawn(async move {
                service.update_stock(&id, 1).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let reloaded = service.get_product_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(reloaded.stock_warehouse, 50);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_creates_with_one_code_keep_a_single_product() {
        let service = Arc::new(service());

        let mut handles = Vec::new();
        for i in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let name = format!("Agua {}", i);
                let result = service.create_product(dto(&name, "SKU-1", 1)).await;
                result
            }));
        }
        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, InventoryError::DuplicateCode(_))),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(service.get_all_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_requires_existing_product() {
        let service = service();
        let product = service.create_product(dto("Agua", "SKU-1", 1)).await.unwrap();

        assert!(service.delete_product(&product.id).await.unwrap());
        let err = service.delete_product(&product.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn products_by_location_are_filtered_and_sorted() {
        let service = service();
        service.create_product(dto("zumo", "SKU-1", 4)).await.unwrap();
        service.create_product(dto("Agua", "SKU-2", 0)).await.unwrap();
        service.create_product(dto("Ácido", "SKU-3", 9)).await.unwrap();
        let mut route_only = dto("Leche", "SKU-4", 0);
        route_only.stock_route = 2;
        service.create_product(route_only).await.unwrap();

        let warehouse = service
            .get_products_by_location(InventoryLocation::Warehouse)
            .await
            .unwrap();
        let names: Vec<_> = warehouse.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ácido", "zumo"]);

        let route = service
            .get_products_by_location(InventoryLocation::Route)
            .await
            .unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route[0].code, "SKU-4");
    }

    #[tokio::test]
    async fn search_with_location_filters_after_matching() {
        let service = service();
        service.create_product(dto("Agua", "SKU-1", 10)).await.unwrap();
        let mut on_route = dto("Agua Mineral", "SKU-2", 0);
        on_route.stock_route = 6;
        service.create_product(on_route).await.unwrap();
        let mut soda = dto("Refresco", "SKU-3", 0);
        soda.stock_route = 2;
        service.create_product(soda).await.unwrap();

        let found = service
            .search_products("agua", Some(InventoryLocation::Route))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "SKU-2");

        let everything_on_route = service
            .search_products("   ", Some(InventoryLocation::Route))
            .await
            .unwrap();
        let names: Vec<_> = everything_on_route.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Agua Mineral", "Refresco"]);

        assert_eq!(service.search_products("", None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn summary_uses_combined_stock() {
        let service = service();
        let mut split = dto("Agua", "SKU-1", 10);
        split.stock_route = 15;
        split.price = dec!(2);
        service.create_product(split).await.unwrap();
        let mut low = dto("Jugo", "SKU-2", 5);
        low.category = "Jugos".to_string();
        service.create_product(low).await.unwrap();
        service.create_product(dto("Refresco", "SKU-3", 0)).await.unwrap();

        let summary = service.get_inventory_summary().await.unwrap();
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.low_stock_products, 1);
        assert_eq!(summary.out_of_stock_products, 1);
        assert_eq!(summary.total_value, dec!(75));
        assert_eq!(summary.categories, vec!["Bebidas", "Jugos"]);
    }
}
