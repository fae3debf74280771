//! Databases: versioned collections of object stores.

use hashbrown::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::key::KeyPath;
use crate::store::ObjectStore;
use crate::txn::{Transaction, TransactionMode, TransactionState};

/// A named, versioned set of object stores.
#[derive(Debug)]
pub struct Database {
    /// Database name.
    pub name: String,
    /// Current schema version. 0 means never migrated.
    pub version: u64,
    stores: HashMap<String, ObjectStore>,
}

impl Database {
    /// Create an empty database at version 0.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: 0,
            stores: HashMap::new(),
        }
    }

    /// Names of the object stores, sorted.
    pub fn object_store_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.stores.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Whether a store exists.
    pub fn has_object_store(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Create an object store. Intended for migration steps.
    pub fn create_object_store(
        &mut self,
        name: &str,
        key_path: KeyPath,
        auto_increment: bool,
    ) -> Result<()> {
        if self.stores.contains_key(name) {
            return Err(Error::Constraint(format!(
                "Object store already exists: {}",
                name
            )));
        }
        debug!(db = %self.name, store = name, "creating object store");
        self.stores
            .insert(name.to_string(), ObjectStore::new(name, key_path, auto_increment));
        Ok(())
    }

    /// Drop an object store. Intended for migration steps.
    pub fn delete_object_store(&mut self, name: &str) -> Result<()> {
        self.stores
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Object store not found: {}", name)))
    }

    /// Direct store access, used by migration steps to define indexes.
    pub fn object_store_mut(&mut self, name: &str) -> Result<&mut ObjectStore> {
        self.stores
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(format!("Object store not found: {}", name)))
    }

    /// Direct read access to a store.
    pub fn object_store(&self, name: &str) -> Result<&ObjectStore> {
        self.stores
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Object store not found: {}", name)))
    }

    /// Open a transaction over `store_names`.
    ///
    /// The transaction holds clones of the named stores; nothing it does is
    /// visible until [`Database::commit`].
    pub fn transaction(&self, store_names: &[&str], mode: TransactionMode) -> Result<Transaction> {
        let mut scoped = HashMap::new();
        for &name in store_names {
            let store = self
                .stores
                .get(name)
                .ok_or_else(|| Error::NotFound(format!("Object store not found: {}", name)))?;
            scoped.insert(name.to_string(), store.clone());
        }
        Ok(Transaction::new(mode, scoped))
    }

    /// Commit a transaction, swapping its stores back in.
    ///
    /// An aborted transaction surfaces its recorded error; committing a
    /// read-only transaction is a no-op for store state.
    pub fn commit(&mut self, mut tx: Transaction) -> Result<()> {
        match tx.state {
            TransactionState::Active => {}
            TransactionState::Finished => {
                return Err(tx
                    .error
                    .take()
                    .unwrap_or_else(|| Error::InvalidState("Transaction already finished".into())));
            }
            TransactionState::Committing => {
                return Err(Error::InvalidState("Transaction already committing".into()))
            }
        }

        tx.state = TransactionState::Committing;
        if tx.mode.writable() {
            for (name, store) in tx.take_stores() {
                self.stores.insert(name, store);
            }
        }
        tx.state = TransactionState::Finished;
        Ok(())
    }
}
