//! Order fulfillment: read order quantities, decrement product stock.
//!
//! Orders are processed independently. An order that cannot be met (the
//! product is missing or stock would go negative) becomes a shortfall
//! entry; the remaining orders still apply, and nothing already applied is
//! rolled back. The product writes for the whole batch share one
//! transaction and commit together.

use timber_idb::{Database, Key, TransactionMode};
use tracing::{info, warn};

use crate::error::CatalogResult;
use crate::models::Product;
use crate::queries::orders;
use crate::schema::PRODUCTS;

/// Why an order could not be fulfilled.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortfallReason {
    /// Stock would go below zero.
    OutOfStock { available: u32, requested: u32 },
    /// No product exists with the order's id.
    UnknownProduct,
}

/// One unfulfillable order.
#[derive(Debug, Clone, PartialEq)]
pub struct Shortfall {
    pub product_id: String,
    pub name: String,
    pub reason: ShortfallReason,
}

/// One applied order line.
#[derive(Debug, Clone, PartialEq)]
pub struct FulfilledLine {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub remaining: u32,
}

/// Outcome of a fulfillment run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FulfillmentReport {
    pub fulfilled: Vec<FulfilledLine>,
    pub shortfalls: Vec<Shortfall>,
}

impl FulfillmentReport {
    /// Whether every order in the batch applied.
    pub fn all_fulfilled(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// Fulfill every order currently in the orders store.
///
/// For each order: read the product with the matching id, compute
/// `remaining = product.quantity - order.quantity`, and either write the
/// product back with the reduced quantity or record a shortfall.
pub fn fulfill_orders(db: &mut Database) -> CatalogResult<FulfillmentReport> {
    let batch = orders(db)?;
    let mut report = FulfillmentReport::default();

    let mut tx = db.transaction(&[PRODUCTS], TransactionMode::ReadWrite)?;
    for order in batch {
        let store = tx.store_mut(PRODUCTS)?;
        let Some(value) = store.get(&Key::from(order.id.as_str())) else {
            warn!(id = %order.id, "order references unknown product");
            report.shortfalls.push(Shortfall {
                product_id: order.id,
                name: order.name,
                reason: ShortfallReason::UnknownProduct,
            });
            continue;
        };

        let mut product = Product::from_value(value)?;
        let Some(remaining) = product.quantity.checked_sub(order.quantity) else {
            warn!(
                id = %order.id,
                available = product.quantity,
                requested = order.quantity,
                "not enough stock"
            );
            report.shortfalls.push(Shortfall {
                product_id: order.id,
                name: order.name,
                reason: ShortfallReason::OutOfStock {
                    available: product.quantity,
                    requested: order.quantity,
                },
            });
            continue;
        };

        product.quantity = remaining;
        store.put(product.to_value()?, None)?;
        report.fulfilled.push(FulfilledLine {
            product_id: order.id,
            name: order.name,
            quantity: order.quantity,
            remaining,
        });
    }
    db.commit(tx)?;

    info!(
        fulfilled = report.fulfilled.len(),
        shortfalls = report.shortfalls.len(),
        "fulfillment finished"
    );
    Ok(report)
}
