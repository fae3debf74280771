//! # Furnish
//!
//! A furniture-catalog demo over the `timber-idb` object-store engine:
//! versioned schema setup, catalog and order seeding, indexed queries
//! (unique name lookup, price-range scans, description lookup), and an
//! order-fulfillment flow that decrements product stock.
//!
//! Every operation opens its own transaction and finishes it before
//! returning; callers own the [`timber_idb::Factory`] and reach the
//! database through it.

pub mod config;
pub mod error;
pub mod fulfill;
pub mod models;
pub mod queries;
pub mod render;
pub mod schema;
pub mod seed;

pub use config::AppConfig;
pub use error::CatalogError;
pub use fulfill::{fulfill_orders, FulfilledLine, FulfillmentReport, Shortfall, ShortfallReason};
pub use models::{Order, Product};
pub use render::{BufferRenderer, RenderTarget, TextRenderer};
