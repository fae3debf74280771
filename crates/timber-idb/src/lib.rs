//! # Timber IDB
//!
//! An in-memory transactional object-store engine, modeled on the browser
//! IndexedDB surface: named object stores holding JSON records under
//! totally ordered keys, secondary indexes with point and range lookups,
//! lazily advanced cursors, and versioned schema migrations.
//!
//! ## Architecture
//!
//! ```text
//! Factory
//!     │
//!     └── Database (name, version)
//!             │
//!             ├── ObjectStore
//!             │       ├── Index
//!             │       └── Records (Key → JSON value)
//!             │
//!             └── Transaction (cloned in-scope stores,
//!                              commit swaps them back)
//! ```
//!
//! Schema evolution is a linear chain of version-tagged [`Migration`]
//! steps applied by a [`Migrator`] from the stored version up to the
//! target version, rather than an upgrade callback.

pub mod cursor;
pub mod database;
pub mod error;
pub mod factory;
pub mod index;
pub mod key;
pub mod migrate;
pub mod range;
pub mod store;
pub mod txn;

pub use cursor::{Cursor, CursorDirection, CursorEntry};
pub use database::Database;
pub use error::{Error, Result};
pub use factory::{DatabaseInfo, DbEvent, Factory};
pub use index::Index;
pub use key::{Key, KeyPath};
pub use migrate::{Migration, Migrator};
pub use range::KeyRange;
pub use store::ObjectStore;
pub use txn::{Transaction, TransactionMode, TransactionState};
