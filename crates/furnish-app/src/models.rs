//! Catalog record types.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::CatalogResult;

/// A product in the catalog. `id` is the primary key; `quantity` is the
/// units in stock and never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub color: String,
    pub material: String,
    pub description: String,
    pub quantity: u32,
}

impl Product {
    pub fn to_value(&self) -> CatalogResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: &JsonValue) -> CatalogResult<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

/// A requested purchase: `quantity` units of the product with the same
/// `id`. Carries the product fields as placed, mirroring the seed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub color: String,
    pub material: String,
    pub description: String,
    pub quantity: u32,
}

impl Order {
    pub fn to_value(&self) -> CatalogResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: &JsonValue) -> CatalogResult<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
