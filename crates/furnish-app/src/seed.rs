//! Seed data and insertion flows.

use timber_idb::{Database, TransactionMode};
use tracing::{info, warn};

use crate::error::CatalogResult;
use crate::models::{Order, Product};
use crate::schema::{ORDERS, PRODUCTS};

fn product(
    id: &str,
    name: &str,
    price: f64,
    color: &str,
    material: &str,
    description: &str,
    quantity: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        color: color.to_string(),
        material: material.to_string(),
        description: description.to_string(),
        quantity,
    }
}

/// The demo catalog.
pub fn catalog() -> Vec<Product> {
    vec![
        product(
            "cch-blk-ma",
            "Couch",
            499.99,
            "black",
            "mahogany",
            "A very comfy couch",
            3,
        ),
        product(
            "ac-gr-pin",
            "Armchair",
            299.99,
            "grey",
            "pine",
            "A plush recliner armchair",
            7,
        ),
        product(
            "st-re-pin",
            "Stool",
            59.99,
            "red",
            "pine",
            "A light, high-stool",
            3,
        ),
        product(
            "ch-blu-pin",
            "Chair",
            49.99,
            "blue",
            "pine",
            "A plain chair for the kitchen table",
            1,
        ),
        product(
            "dr-wht-ply",
            "Dresser",
            399.99,
            "white",
            "plywood",
            "A plain dresser with five drawers",
            4,
        ),
        product(
            "ca-brn-ma",
            "Cabinet",
            799.99,
            "brown",
            "mahogany",
            "An intricately-designed, antique cabinet",
            11,
        ),
    ]
}

/// The demo order book: Cabinet x7, Armchair x3, Couch x3.
pub fn order_book() -> Vec<Order> {
    let quantities = [("ca-brn-ma", 7), ("ac-gr-pin", 3), ("cch-blk-ma", 3)];
    catalog()
        .into_iter()
        .filter_map(|p| {
            quantities
                .iter()
                .find(|(id, _)| *id == p.id)
                .map(|(_, quantity)| Order {
                    id: p.id,
                    name: p.name,
                    price: p.price,
                    color: p.color,
                    material: p.material,
                    description: p.description,
                    quantity: *quantity,
                })
        })
        .collect()
}

/// Insert the demo catalog into the products store.
///
/// A constraint failure (duplicate id or duplicate unique name) aborts the
/// whole transaction: either every product lands or none does.
pub fn seed_products(db: &mut Database) -> CatalogResult<()> {
    let mut tx = db.transaction(&[PRODUCTS], TransactionMode::ReadWrite)?;
    for item in catalog() {
        let value = item.to_value()?;
        if let Err(error) = tx.store_mut(PRODUCTS)?.add(value, None) {
            warn!(%error, id = %item.id, "product seeding aborted");
            tx.abort(error);
            break;
        }
    }
    db.commit(tx)?;
    info!("catalog seeded");
    Ok(())
}

/// Insert the demo orders into the orders store, same all-or-nothing rule.
pub fn seed_orders(db: &mut Database) -> CatalogResult<()> {
    let mut tx = db.transaction(&[ORDERS], TransactionMode::ReadWrite)?;
    for order in order_book() {
        let value = order.to_value()?;
        if let Err(error) = tx.store_mut(ORDERS)?.add(value, None) {
            warn!(%error, id = %order.id, "order seeding aborted");
            tx.abort(error);
            break;
        }
    }
    db.commit(tx)?;
    info!("orders seeded");
    Ok(())
}
