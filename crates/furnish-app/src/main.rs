//! Furnish demo binary.
//!
//! Runs the catalog demo end to end: open the database through its
//! migration chain, seed products and orders, run the example queries,
//! then fulfill the order book and print the receipt.

use anyhow::{Context, Result};
use tracing::info;

use furnish_app::{
    fulfill::fulfill_orders,
    queries::{list_orders, product_by_name, products_by_description, products_by_price},
    render::{RenderTarget, TextRenderer},
    schema,
    seed::{seed_orders, seed_products},
    AppConfig,
};
use timber_common::{init_logging, LogConfig};
use timber_idb::Factory;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::default();

    let mut log_config = LogConfig::default();
    if let Some(ref filter) = config.log_filter {
        log_config = log_config.with_filter(filter.clone());
    }
    init_logging(log_config);

    let (factory, mut events) = Factory::new();
    let migrator = schema::migrator();
    factory
        .open(&config.database_name, &migrator)
        .await
        .context("opening catalog database")?;
    while let Ok(event) = events.try_recv() {
        info!(?event, "database event");
    }

    let mut out = TextRenderer::new(std::io::stdout());

    factory
        .with_database(&config.database_name, |db| {
            seed_products(db).map_err(storage_err)?;
            seed_orders(db).map_err(storage_err)?;
            Ok(())
        })
        .await
        .context("seeding demo data")?;

    factory
        .with_database(&config.database_name, |db| {
            let couch = product_by_name(db, "Couch").map_err(storage_err)?;
            out.results("By name: Couch", couch.as_slice());

            let in_range = products_by_price(db, config.price_lower, config.price_upper)
                .map_err(storage_err)?;
            out.results("By price range", &in_range);

            let comfy =
                products_by_description(db, "A very comfy couch").map_err(storage_err)?;
            out.results("By description", &comfy);

            let book = list_orders(db).map_err(storage_err)?;
            out.orders(&book);

            let report = fulfill_orders(db).map_err(storage_err)?;
            out.receipt(&report);
            Ok(())
        })
        .await
        .context("running the demo flow")?;

    Ok(())
}

/// `Factory::with_database` closures speak the engine's error type; fold
/// catalog errors (which may also be encoding failures) into it.
fn storage_err(err: furnish_app::CatalogError) -> timber_idb::Error {
    match err {
        furnish_app::CatalogError::Storage(e) => e,
        furnish_app::CatalogError::Encoding(e) => timber_idb::Error::Data(e.to_string()),
    }
}
