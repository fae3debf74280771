//! Catalog query flows.
//!
//! Each query opens its own read-only transaction, walks a point lookup or
//! a range cursor, and returns typed records. Empty inputs return empty
//! results rather than scanning everything, matching the form-driven
//! behavior of the demo UI.

use timber_idb::{CursorDirection, Database, Key, KeyRange, TransactionMode};

use crate::error::CatalogResult;
use crate::models::{Order, Product};
use crate::schema::{DESCRIPTION_INDEX, NAME_INDEX, ORDERS, PRICE_INDEX, PRODUCTS};

/// Point lookup on the unique name index.
pub fn product_by_name(db: &Database, name: &str) -> CatalogResult<Option<Product>> {
    if name.is_empty() {
        return Ok(None);
    }
    let tx = db.transaction(&[PRODUCTS], TransactionMode::ReadOnly)?;
    let found = tx
        .store(PRODUCTS)?
        .get_by_index(NAME_INDEX, &Key::from(name))?
        .cloned();
    found.as_ref().map(Product::from_value).transpose()
}

/// Products whose price falls in the given inclusive range, ascending by
/// price. A missing end leaves that side unbounded; no bounds at all is a
/// no-op.
pub fn products_by_price(
    db: &Database,
    lower: Option<f64>,
    upper: Option<f64>,
) -> CatalogResult<Vec<Product>> {
    let range = match (lower, upper) {
        (Some(lo), Some(hi)) => KeyRange::bound(lo, hi),
        (Some(lo), None) => KeyRange::lower_bound(lo),
        (None, Some(hi)) => KeyRange::upper_bound(hi),
        (None, None) => return Ok(Vec::new()),
    };

    let tx = db.transaction(&[PRODUCTS], TransactionMode::ReadOnly)?;
    let cursor =
        tx.store(PRODUCTS)?
            .open_index_cursor(PRICE_INDEX, Some(&range), CursorDirection::Next)?;
    cursor
        .map(|entry| Product::from_value(&entry.value))
        .collect()
}

/// Products with exactly the given description.
pub fn products_by_description(db: &Database, description: &str) -> CatalogResult<Vec<Product>> {
    if description.is_empty() {
        return Ok(Vec::new());
    }
    let range = KeyRange::only(description);

    let tx = db.transaction(&[PRODUCTS], TransactionMode::ReadOnly)?;
    let cursor = tx.store(PRODUCTS)?.open_index_cursor(
        DESCRIPTION_INDEX,
        Some(&range),
        CursorDirection::Next,
    )?;
    cursor
        .map(|entry| Product::from_value(&entry.value))
        .collect()
}

/// All orders, ascending by order id.
pub fn orders(db: &Database) -> CatalogResult<Vec<Order>> {
    let tx = db.transaction(&[ORDERS], TransactionMode::ReadOnly)?;
    tx.store(ORDERS)?
        .get_all(None)
        .into_iter()
        .map(Order::from_value)
        .collect()
}

/// Orders-panel listing: walks the orders store with a cursor rather than
/// materializing the whole store at once.
pub fn list_orders(db: &Database) -> CatalogResult<Vec<Order>> {
    let tx = db.transaction(&[ORDERS], TransactionMode::ReadOnly)?;
    let cursor = tx.store(ORDERS)?.open_cursor(None, CursorDirection::Next);
    cursor.map(|entry| Order::from_value(&entry.value)).collect()
}
