//! Store names, index names, and the schema migration chain.
//!
//! Version history: v1 reserved the database name, v2 added the products
//! store, v3 the unique name index, v4 the price and description indexes,
//! v5 the orders store. Version 1 has no step of its own.

use timber_idb::{KeyPath, Migrator};

pub const PRODUCTS: &str = "products";
pub const ORDERS: &str = "orders";

pub const NAME_INDEX: &str = "name";
pub const PRICE_INDEX: &str = "price";
pub const DESCRIPTION_INDEX: &str = "description";

/// Current schema version.
pub const SCHEMA_VERSION: u64 = 5;

/// The full migration chain up to [`SCHEMA_VERSION`].
pub fn migrator() -> Migrator {
    Migrator::new(SCHEMA_VERSION)
        .step(2, "create products store", |db| {
            db.create_object_store(PRODUCTS, KeyPath::single("id"), false)
        })
        .step(3, "create unique name index", |db| {
            db.object_store_mut(PRODUCTS)?
                .create_index(NAME_INDEX, KeyPath::single("name"), true)
        })
        .step(4, "create price and description indexes", |db| {
            let store = db.object_store_mut(PRODUCTS)?;
            store.create_index(PRICE_INDEX, KeyPath::single("price"), false)?;
            store.create_index(DESCRIPTION_INDEX, KeyPath::single("description"), false)
        })
        .step(5, "create orders store", |db| {
            db.create_object_store(ORDERS, KeyPath::single("id"), false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use timber_idb::Database;

    #[test]
    fn test_migration_builds_full_schema() {
        let mut db = Database::new("test");
        migrator().run(&mut db).unwrap();

        assert_eq!(db.version, SCHEMA_VERSION);
        assert_eq!(db.object_store_names(), vec![ORDERS, PRODUCTS]);

        let products = db.object_store(PRODUCTS).unwrap();
        let mut indexes = products.index_names();
        indexes.sort_unstable();
        assert_eq!(indexes, vec![DESCRIPTION_INDEX, NAME_INDEX, PRICE_INDEX]);
        assert!(db.object_store(ORDERS).unwrap().index_names().is_empty());
    }

    #[test]
    fn test_migration_twice_yields_same_schema() {
        let mut db = Database::new("test");
        let chain = migrator();
        chain.run(&mut db).unwrap();
        let stores_once = db.object_store_names().len();
        let indexes_once = db.object_store(PRODUCTS).unwrap().index_names().len();

        chain.run(&mut db).unwrap();
        assert_eq!(db.version, SCHEMA_VERSION);
        assert_eq!(db.object_store_names().len(), stores_once);
        assert_eq!(
            db.object_store(PRODUCTS).unwrap().index_names().len(),
            indexes_once
        );
    }

    #[test]
    fn test_upgrade_from_intermediate_version() {
        // A database stuck before the orders store gains only the missing
        // pieces.
        let mut db = Database::new("test");
        Migrator::new(3)
            .step(2, "create products store", |db| {
                db.create_object_store(PRODUCTS, KeyPath::single("id"), false)
            })
            .step(3, "create unique name index", |db| {
                db.object_store_mut(PRODUCTS)?
                    .create_index(NAME_INDEX, KeyPath::single("name"), true)
            })
            .run(&mut db)
            .unwrap();

        migrator().run(&mut db).unwrap();
        assert_eq!(db.version, SCHEMA_VERSION);
        assert!(db.has_object_store(ORDERS));
        assert!(db
            .object_store(PRODUCTS)
            .unwrap()
            .index(PRICE_INDEX)
            .is_ok());
    }
}
