//! Record keys and key paths.
//!
//! Keys are totally ordered so stores and indexes can serve range cursors:
//! numbers sort before strings, strings before arrays, and arrays compare
//! element-wise. NaN is rejected at construction, which makes the ordering
//! total and lets `Key` sit in a `BTreeMap`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A record key: a number, a string, or an array of keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Key {
    Number(f64),
    Text(String),
    Array(Vec<Key>),
}

impl Key {
    /// Build a key from a JSON value. Booleans, null, and objects are not
    /// valid keys.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Number(n) => {
                let n = n
                    .as_f64()
                    .ok_or_else(|| Error::Data(format!("Number is not a valid key: {}", n)))?;
                if n.is_nan() {
                    return Err(Error::Data("NaN is not a valid key".to_string()));
                }
                Ok(Key::Number(n))
            }
            JsonValue::String(s) => Ok(Key::Text(s.clone())),
            JsonValue::Array(items) => {
                let keys = items.iter().map(Key::from_value).collect::<Result<_>>()?;
                Ok(Key::Array(keys))
            }
            other => Err(Error::Data(format!("Not a valid key: {}", other))),
        }
    }

    /// Rank used to order keys of different kinds.
    fn kind_rank(&self) -> u8 {
        match self {
            Key::Number(_) => 0,
            Key::Text(_) => 1,
            Key::Array(_) => 2,
        }
    }
}

impl Eq for Key {}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Number(a), Key::Number(b)) => a.total_cmp(b),
            (Key::Text(a), Key::Text(b)) => a.cmp(b),
            (Key::Array(a), Key::Array(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Number(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{}", s),
            Key::Array(keys) => {
                write!(f, "[")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", key)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Key::Number(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

/// Key path for object stores and indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyPath {
    /// No key path (out-of-line keys).
    None,
    /// Single property.
    Single(String),
    /// Multiple properties (compound key).
    Multiple(Vec<String>),
}

impl KeyPath {
    /// Shorthand for a single-property path.
    pub fn single(field: impl Into<String>) -> Self {
        KeyPath::Single(field.into())
    }

    /// Extract the key value from a record.
    pub fn extract(&self, value: &JsonValue) -> Option<JsonValue> {
        match self {
            KeyPath::None => None,
            KeyPath::Single(path) => value.get(path).cloned(),
            KeyPath::Multiple(paths) => {
                let parts: Vec<JsonValue> =
                    paths.iter().filter_map(|p| value.get(p).cloned()).collect();
                if parts.len() == paths.len() {
                    Some(JsonValue::Array(parts))
                } else {
                    None
                }
            }
        }
    }

    /// Extract and convert in one step.
    pub fn extract_key(&self, value: &JsonValue) -> Option<Result<Key>> {
        self.extract(value).map(|v| Key::from_value(&v))
    }
}
