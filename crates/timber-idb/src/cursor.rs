//! Cursors over store and index ranges.

use serde_json::Value as JsonValue;

use crate::key::Key;

/// Cursor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorDirection {
    /// Ascending key order.
    #[default]
    Next,
    /// Descending key order.
    Prev,
}

/// One record position of a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorEntry {
    /// Key in the cursor's source ordering (index key for index cursors).
    pub key: Key,
    /// Primary key of the record in its object store.
    pub primary_key: Key,
    /// The record itself.
    pub value: JsonValue,
}

/// A sequential iterator over records within a range.
///
/// Entries are captured at open time from the transaction's view of the
/// store, so the cursor stays stable while the caller mutates records.
#[derive(Debug)]
pub struct Cursor {
    /// Store or index the cursor was opened on.
    pub source: String,
    /// Direction of travel.
    pub direction: CursorDirection,
    entries: Vec<CursorEntry>,
    position: usize,
}

impl Cursor {
    pub(crate) fn new(
        source: impl Into<String>,
        mut entries: Vec<CursorEntry>,
        direction: CursorDirection,
    ) -> Self {
        if direction == CursorDirection::Prev {
            entries.reverse();
        }
        Self {
            source: source.into(),
            direction,
            entries,
            position: 0,
        }
    }

    /// Current entry, or `None` once exhausted.
    pub fn entry(&self) -> Option<&CursorEntry> {
        self.entries.get(self.position)
    }

    /// Current record value.
    pub fn value(&self) -> Option<&JsonValue> {
        self.entry().map(|e| &e.value)
    }

    /// Current key in source order.
    pub fn key(&self) -> Option<&Key> {
        self.entry().map(|e| &e.key)
    }

    /// Advance one position. Returns false once past the end.
    pub fn advance(&mut self) -> bool {
        if self.position < self.entries.len() {
            self.position += 1;
        }
        self.position < self.entries.len()
    }

    /// Advance by `count` positions.
    pub fn advance_by(&mut self, count: usize) -> bool {
        for _ in 0..count {
            if !self.advance() {
                return false;
            }
        }
        true
    }

    /// Whether the cursor has run off the end.
    pub fn done(&self) -> bool {
        self.position >= self.entries.len()
    }

    /// Drain the remaining entries in order.
    pub fn collect_remaining(mut self) -> Vec<CursorEntry> {
        self.entries.split_off(self.position)
    }
}

impl Iterator for Cursor {
    type Item = CursorEntry;

    fn next(&mut self) -> Option<CursorEntry> {
        let entry = self.entries.get(self.position).cloned();
        if entry.is_some() {
            self.position += 1;
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(n: f64) -> CursorEntry {
        CursorEntry {
            key: Key::Number(n),
            primary_key: Key::Number(n),
            value: json!({ "n": n }),
        }
    }

    #[test]
    fn test_cursor_forward() {
        let mut cursor = Cursor::new(
            "test",
            vec![entry(1.0), entry(2.0), entry(3.0)],
            CursorDirection::Next,
        );

        assert_eq!(cursor.key(), Some(&Key::Number(1.0)));
        assert!(cursor.advance());
        assert_eq!(cursor.key(), Some(&Key::Number(2.0)));
        assert!(cursor.advance());
        assert_eq!(cursor.key(), Some(&Key::Number(3.0)));
        assert!(!cursor.advance());
        assert!(cursor.done());
        assert_eq!(cursor.key(), None);
    }

    #[test]
    fn test_cursor_reverse() {
        let cursor = Cursor::new(
            "test",
            vec![entry(1.0), entry(2.0), entry(3.0)],
            CursorDirection::Prev,
        );

        let keys: Vec<Key> = cursor.map(|e| e.key).collect();
        assert_eq!(
            keys,
            vec![Key::Number(3.0), Key::Number(2.0), Key::Number(1.0)]
        );
    }

    #[test]
    fn test_cursor_advance_by() {
        let mut cursor = Cursor::new(
            "test",
            vec![entry(1.0), entry(2.0), entry(3.0)],
            CursorDirection::Next,
        );

        assert!(cursor.advance_by(2));
        assert_eq!(cursor.key(), Some(&Key::Number(3.0)));
        assert!(!cursor.advance_by(1));
    }

    #[test]
    fn test_collect_remaining() {
        let mut cursor = Cursor::new(
            "test",
            vec![entry(1.0), entry(2.0), entry(3.0)],
            CursorDirection::Next,
        );
        cursor.advance();

        let rest = cursor.collect_remaining();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].key, Key::Number(2.0));
    }
}
