//! Secondary indexes over object stores.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::key::{Key, KeyPath};
use crate::range::KeyRange;

/// A secondary ordering over a declared field of a store's records.
///
/// Entries map index keys to the primary keys of matching records, in
/// ascending index-key order. For non-unique indexes several records may
/// share one index key; their primary keys are kept sorted.
#[derive(Debug, Clone)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Field the index is built over.
    pub key_path: KeyPath,
    /// Whether index keys must be unique across records.
    pub unique: bool,
    entries: BTreeMap<Key, Vec<Key>>,
}

impl Index {
    pub(crate) fn new(name: &str, key_path: KeyPath, unique: bool) -> Self {
        Self {
            name: name.to_string(),
            key_path,
            unique,
            entries: BTreeMap::new(),
        }
    }

    /// Verify that inserting `index_key` for `primary_key` would not break
    /// the unique constraint. Replacing a record's own entry is allowed.
    pub(crate) fn check_insert(&self, index_key: &Key, primary_key: &Key) -> Result<()> {
        if !self.unique {
            return Ok(());
        }
        match self.entries.get(index_key) {
            Some(existing) if existing.iter().any(|pk| pk != primary_key) => {
                Err(Error::Constraint(format!(
                    "Duplicate key in unique index {}: {}",
                    self.name, index_key
                )))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn add_entry(&mut self, index_key: Key, primary_key: Key) -> Result<()> {
        self.check_insert(&index_key, &primary_key)?;
        let keys = self.entries.entry(index_key).or_default();
        if let Err(pos) = keys.binary_search(&primary_key) {
            keys.insert(pos, primary_key);
        }
        Ok(())
    }

    pub(crate) fn delete_entry(&mut self, index_key: &Key, primary_key: &Key) {
        if let Some(keys) = self.entries.get_mut(index_key) {
            keys.retain(|k| k != primary_key);
            if keys.is_empty() {
                self.entries.remove(index_key);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Primary key of the first record under `index_key`.
    pub fn get(&self, index_key: &Key) -> Option<&Key> {
        self.entries.get(index_key).and_then(|keys| keys.first())
    }

    /// Whether any record is indexed under `index_key`.
    pub fn contains(&self, index_key: &Key) -> bool {
        self.entries.contains_key(index_key)
    }

    /// Number of distinct index keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// (index key, primary key) pairs within `range`, ascending by index
    /// key. `None` scans the whole index.
    pub fn scan(&self, range: Option<&KeyRange>) -> Vec<(Key, Key)> {
        let mut pairs = Vec::new();
        match range {
            Some(range) if range.is_empty() => {}
            Some(range) => {
                for (index_key, primaries) in self.entries.range::<Key, _>(range.bounds()) {
                    for primary in primaries {
                        pairs.push((index_key.clone(), primary.clone()));
                    }
                }
            }
            None => {
                for (index_key, primaries) in &self.entries {
                    for primary in primaries {
                        pairs.push((index_key.clone(), primary.clone()));
                    }
                }
            }
        }
        pairs
    }
}
