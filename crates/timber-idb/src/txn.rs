//! Transactions over a fixed scope of object stores.
//!
//! A read-write transaction works on clones of its in-scope stores;
//! [`Database::commit`](crate::Database::commit) swaps the clones back in
//! one step, and an abort simply discards them. Within a single
//! transaction this gives all-or-nothing visibility for its writes.

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::store::ObjectStore;

/// Transaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    ReadOnly,
    ReadWrite,
    VersionChange,
}

impl TransactionMode {
    /// Whether the mode permits mutation.
    pub fn writable(self) -> bool {
        !matches!(self, TransactionMode::ReadOnly)
    }
}

/// Transaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Active,
    Committing,
    Finished,
}

/// A unit of work against one or more object stores.
#[derive(Debug)]
pub struct Transaction {
    /// Transaction mode.
    pub mode: TransactionMode,
    /// State.
    pub state: TransactionState,
    /// Error recorded on abort.
    pub error: Option<Error>,
    pub(crate) stores: HashMap<String, ObjectStore>,
}

impl Transaction {
    pub(crate) fn new(mode: TransactionMode, stores: HashMap<String, ObjectStore>) -> Self {
        Self {
            mode,
            state: TransactionState::Active,
            error: None,
            stores,
        }
    }

    /// Whether the transaction can still accept operations.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Whether `name` is in the transaction's scope.
    pub fn has_store(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    /// Read access to an in-scope store.
    pub fn store(&self, name: &str) -> Result<&ObjectStore> {
        if !self.is_active() {
            return Err(Error::TransactionInactive);
        }
        self.stores
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Store not in transaction scope: {}", name)))
    }

    /// Write access to an in-scope store.
    pub fn store_mut(&mut self, name: &str) -> Result<&mut ObjectStore> {
        if !self.is_active() {
            return Err(Error::TransactionInactive);
        }
        if !self.mode.writable() {
            return Err(Error::ReadOnly);
        }
        self.stores
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(format!("Store not in transaction scope: {}", name)))
    }

    /// Abort, discarding all buffered writes.
    pub fn abort(&mut self, error: Error) {
        self.state = TransactionState::Finished;
        self.error = Some(error);
    }

    pub(crate) fn take_stores(&mut self) -> HashMap<String, ObjectStore> {
        std::mem::take(&mut self.stores)
    }
}
