//! Object stores: named collections of keyed JSON records.

use hashbrown::HashMap;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::trace;

use crate::cursor::{Cursor, CursorDirection, CursorEntry};
use crate::error::{Error, Result};
use crate::index::Index;
use crate::key::{Key, KeyPath};
use crate::range::KeyRange;

/// A keyed record collection with secondary indexes.
///
/// Records live in a `BTreeMap`, so store cursors walk primary keys in
/// ascending order. Index maintenance is validate-then-apply: a constraint
/// violation leaves the store untouched.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    /// Store name.
    pub name: String,
    /// How primary keys are derived from records.
    pub key_path: KeyPath,
    /// Generate numeric keys when the record carries none.
    pub auto_increment: bool,
    records: BTreeMap<Key, JsonValue>,
    indexes: HashMap<String, Index>,
    next_key: u64,
}

impl ObjectStore {
    pub(crate) fn new(name: &str, key_path: KeyPath, auto_increment: bool) -> Self {
        Self {
            name: name.to_string(),
            key_path,
            auto_increment,
            records: BTreeMap::new(),
            indexes: HashMap::new(),
            next_key: 1,
        }
    }

    /// Get a record by primary key.
    pub fn get(&self, key: &Key) -> Option<&JsonValue> {
        self.records.get(key)
    }

    /// All records in ascending primary-key order.
    pub fn get_all(&self, count: Option<usize>) -> Vec<&JsonValue> {
        let mut records: Vec<_> = self.records.values().collect();
        if let Some(n) = count {
            records.truncate(n);
        }
        records
    }

    /// All primary keys in ascending order.
    pub fn get_all_keys(&self, count: Option<usize>) -> Vec<&Key> {
        let mut keys: Vec<_> = self.records.keys().collect();
        if let Some(n) = count {
            keys.truncate(n);
        }
        keys
    }

    /// Number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Insert a record; fails if the key already exists.
    pub fn add(&mut self, value: JsonValue, key: Option<Key>) -> Result<Key> {
        let key = self.resolve_key(&value, key)?;
        if self.records.contains_key(&key) {
            return Err(Error::Constraint(format!(
                "Key already exists in {}: {}",
                self.name, key
            )));
        }
        self.check_indexes(&value, &key)?;
        trace!(store = %self.name, key = %key, "add");
        self.apply_insert(key.clone(), value);
        Ok(key)
    }

    /// Insert or overwrite a record.
    pub fn put(&mut self, value: JsonValue, key: Option<Key>) -> Result<Key> {
        let key = self.resolve_key(&value, key)?;
        self.check_indexes(&value, &key)?;
        trace!(store = %self.name, key = %key, "put");
        if self.records.contains_key(&key) {
            self.remove_from_indexes(&key);
        }
        self.apply_insert(key.clone(), value);
        Ok(key)
    }

    /// Delete a record. Returns whether it existed.
    pub fn delete(&mut self, key: &Key) -> bool {
        if self.records.contains_key(key) {
            self.remove_from_indexes(key);
            self.records.remove(key);
            true
        } else {
            false
        }
    }

    /// Remove all records, keeping indexes defined but empty.
    pub fn clear(&mut self) {
        self.records.clear();
        for index in self.indexes.values_mut() {
            index.clear();
        }
    }

    /// Create an index, backfilling from existing records.
    pub fn create_index(&mut self, name: &str, key_path: KeyPath, unique: bool) -> Result<()> {
        if self.indexes.contains_key(name) {
            return Err(Error::Constraint(format!(
                "Index already exists on {}: {}",
                self.name, name
            )));
        }

        let mut index = Index::new(name, key_path, unique);
        for (primary_key, value) in &self.records {
            if let Some(index_key) = index.key_path.extract_key(value) {
                index.add_entry(index_key?, primary_key.clone())?;
            }
        }
        self.indexes.insert(name.to_string(), index);
        Ok(())
    }

    /// Drop an index. Returns whether it existed.
    pub fn delete_index(&mut self, name: &str) -> bool {
        self.indexes.remove(name).is_some()
    }

    /// Look up an index by name.
    pub fn index(&self, name: &str) -> Result<&Index> {
        self.indexes
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("Index not found on {}: {}", self.name, name)))
    }

    /// Names of the store's indexes.
    pub fn index_names(&self) -> Vec<&str> {
        self.indexes.keys().map(|s| s.as_str()).collect()
    }

    /// Cursor over records by primary key.
    pub fn open_cursor(&self, range: Option<&KeyRange>, direction: CursorDirection) -> Cursor {
        let entries = match range {
            Some(range) if range.is_empty() => Vec::new(),
            Some(range) => self
                .records
                .range::<Key, _>(range.bounds())
                .map(|(k, v)| CursorEntry {
                    key: k.clone(),
                    primary_key: k.clone(),
                    value: v.clone(),
                })
                .collect(),
            None => self
                .records
                .iter()
                .map(|(k, v)| CursorEntry {
                    key: k.clone(),
                    primary_key: k.clone(),
                    value: v.clone(),
                })
                .collect(),
        };
        Cursor::new(self.name.clone(), entries, direction)
    }

    /// Cursor over records in index-key order within `range`.
    pub fn open_index_cursor(
        &self,
        index_name: &str,
        range: Option<&KeyRange>,
        direction: CursorDirection,
    ) -> Result<Cursor> {
        let index = self.index(index_name)?;
        let entries = index
            .scan(range)
            .into_iter()
            .filter_map(|(index_key, primary_key)| {
                self.records.get(&primary_key).map(|value| CursorEntry {
                    key: index_key,
                    primary_key,
                    value: value.clone(),
                })
            })
            .collect();
        Ok(Cursor::new(
            format!("{}.{}", self.name, index_name),
            entries,
            direction,
        ))
    }

    /// Record matching an index key, if any.
    pub fn get_by_index(&self, index_name: &str, index_key: &Key) -> Result<Option<&JsonValue>> {
        let index = self.index(index_name)?;
        Ok(index.get(index_key).and_then(|pk| self.records.get(pk)))
    }

    fn resolve_key(&mut self, value: &JsonValue, key: Option<Key>) -> Result<Key> {
        if let Some(key) = key {
            return Ok(key);
        }
        match &self.key_path {
            KeyPath::Single(_) | KeyPath::Multiple(_) => self
                .key_path
                .extract_key(value)
                .ok_or_else(|| {
                    Error::Data(format!("Could not extract key for store {}", self.name))
                })?,
            KeyPath::None if self.auto_increment => {
                let key = Key::Number(self.next_key as f64);
                self.next_key += 1;
                Ok(key)
            }
            KeyPath::None => Err(Error::Data(format!(
                "No key provided for store {} and no auto-increment",
                self.name
            ))),
        }
    }

    /// Check every index constraint before touching any state.
    fn check_indexes(&self, value: &JsonValue, primary_key: &Key) -> Result<()> {
        for index in self.indexes.values() {
            if let Some(index_key) = index.key_path.extract_key(value) {
                index.check_insert(&index_key?, primary_key)?;
            }
        }
        Ok(())
    }

    fn apply_insert(&mut self, key: Key, value: JsonValue) {
        for index in self.indexes.values_mut() {
            if let Some(Ok(index_key)) = index.key_path.extract_key(&value) {
                // Constraints were checked up front.
                let _ = index.add_entry(index_key, key.clone());
            }
        }
        self.records.insert(key, value);
    }

    fn remove_from_indexes(&mut self, primary_key: &Key) {
        if let Some(value) = self.records.get(primary_key) {
            let value = value.clone();
            for index in self.indexes.values_mut() {
                if let Some(Ok(index_key)) = index.key_path.extract_key(&value) {
                    index.delete_entry(&index_key, primary_key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn products() -> ObjectStore {
        ObjectStore::new("products", KeyPath::single("id"), false)
    }

    #[test]
    fn test_add_extracts_key() {
        let mut store = products();
        let key = store
            .add(json!({"id": "cch-blk-ma", "name": "Couch"}), None)
            .unwrap();

        assert_eq!(key, Key::from("cch-blk-ma"));
        assert!(store.get(&key).is_some());
    }

    #[test]
    fn test_add_duplicate_key_fails() {
        let mut store = products();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();

        let err = store.add(json!({"id": "a", "name": "Stool"}), None);
        assert!(matches!(err, Err(Error::Constraint(_))));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = products();
        store.add(json!({"id": "a", "quantity": 3}), None).unwrap();
        store.put(json!({"id": "a", "quantity": 0}), None).unwrap();

        let record = store.get(&Key::from("a")).unwrap();
        assert_eq!(record["quantity"], 0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_auto_increment() {
        let mut store = ObjectStore::new("log", KeyPath::None, true);
        let k1 = store.add(json!({"event": "a"}), None).unwrap();
        let k2 = store.add(json!({"event": "b"}), None).unwrap();

        assert_eq!(k1, Key::Number(1.0));
        assert_eq!(k2, Key::Number(2.0));
    }

    #[test]
    fn test_missing_key_is_data_error() {
        let mut store = products();
        let err = store.add(json!({"name": "Couch"}), None);
        assert!(matches!(err, Err(Error::Data(_))));
    }

    #[test]
    fn test_unique_index_violation_leaves_store_unchanged() {
        let mut store = products();
        store
            .create_index("name", KeyPath::single("name"), true)
            .unwrap();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();

        let err = store.add(json!({"id": "b", "name": "Couch"}), None);
        assert!(matches!(err, Err(Error::Constraint(_))));
        assert_eq!(store.count(), 1);
        assert!(store.get(&Key::from("b")).is_none());
    }

    #[test]
    fn test_index_backfill_on_create() {
        let mut store = products();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();
        store.add(json!({"id": "b", "name": "Stool"}), None).unwrap();

        store
            .create_index("name", KeyPath::single("name"), true)
            .unwrap();
        let record = store
            .get_by_index("name", &Key::from("Couch"))
            .unwrap()
            .unwrap();
        assert_eq!(record["id"], "a");
    }

    #[test]
    fn test_put_moves_index_entry() {
        let mut store = products();
        store
            .create_index("name", KeyPath::single("name"), true)
            .unwrap();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();
        store.put(json!({"id": "a", "name": "Settee"}), None).unwrap();

        assert!(store
            .get_by_index("name", &Key::from("Couch"))
            .unwrap()
            .is_none());
        assert!(store
            .get_by_index("name", &Key::from("Settee"))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_delete_removes_index_entries() {
        let mut store = products();
        store
            .create_index("name", KeyPath::single("name"), true)
            .unwrap();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();

        assert!(store.delete(&Key::from("a")));
        assert!(store
            .get_by_index("name", &Key::from("Couch"))
            .unwrap()
            .is_none());
        // The same name is insertable again.
        store.add(json!({"id": "b", "name": "Couch"}), None).unwrap();
    }

    #[test]
    fn test_index_cursor_orders_by_index_key() {
        let mut store = products();
        store
            .create_index("price", KeyPath::single("price"), false)
            .unwrap();
        store
            .add(json!({"id": "couch", "price": 499.99}), None)
            .unwrap();
        store
            .add(json!({"id": "stool", "price": 59.99}), None)
            .unwrap();
        store
            .add(json!({"id": "armchair", "price": 299.99}), None)
            .unwrap();

        let range = KeyRange::bound(50.0, 300.0);
        let cursor = store
            .open_index_cursor("price", Some(&range), CursorDirection::Next)
            .unwrap();
        let ids: Vec<String> = cursor
            .map(|e| e.value["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["stool", "armchair"]);
    }

    #[test]
    fn test_store_cursor_primary_order() {
        let mut store = products();
        store.add(json!({"id": "c"}), None).unwrap();
        store.add(json!({"id": "a"}), None).unwrap();
        store.add(json!({"id": "b"}), None).unwrap();

        let keys: Vec<Key> = store
            .open_cursor(None, CursorDirection::Next)
            .map(|e| e.primary_key)
            .collect();
        assert_eq!(
            keys,
            vec![Key::from("a"), Key::from("b"), Key::from("c")]
        );
    }

    #[test]
    fn test_clear_keeps_indexes_defined() {
        let mut store = products();
        store
            .create_index("name", KeyPath::single("name"), true)
            .unwrap();
        store.add(json!({"id": "a", "name": "Couch"}), None).unwrap();

        store.clear();
        assert_eq!(store.count(), 0);
        assert!(store.index("name").is_ok());
    }
}
