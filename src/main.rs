// src/main.rs
use field_sales::adapter::AppContainer;
use field_sales::config::Config;
use field_sales::domain::errors::AppResult;
use field_sales::domain::model::{InventoryLocation, StockStatus};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = match std::env::var("FIELD_SALES_CONFIG") {
        Ok(path) => Config::from_file(path)?,
        Err(_) => Config::from_env()?,
    };

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting field_sales v{}", env!("CARGO_PKG_VERSION"));

    let container = AppContainer::from_config(&config.storage).await?;
    let products = container.product_service();
    let orders = container.order_service();

    let inventory = products.get_inventory_summary().await?;
    log::info!(
        "Inventory: {} products, {} low, {} out of stock, value {}",
        inventory.total_products,
        inventory.low_stock_products,
        inventory.out_of_stock_products,
        inventory.total_value
    );
    log::info!("Categories: {}", inventory.categories.join(", "));

    let catalog = products.get_all_products().await?;
    for location in [InventoryLocation::Warehouse, InventoryLocation::Route] {
        let attention: Vec<_> = catalog
            .iter()
            .filter(|p| p.stock_status_at(location) != StockStatus::Available)
            .map(|p| format!("{} ({})", p.code, p.stock_at(location)))
            .collect();
        if !attention.is_empty() {
            log::warn!("Restock needed at {}: {}", location, attention.join(", "));
        }
    }

    let summary = orders.get_orders_summary().await?;
    log::info!(
        "Orders: {} total, {} pending, {} confirmed, {} today, amount {}",
        summary.total_orders,
        summary.pending_orders,
        summary.confirmed_orders,
        summary.today_orders,
        summary.total_amount
    );

    let clients = container.client_repository().get_all().await?;
    log::info!("{} clients available", clients.len());

    Ok(())
}
