//! Key ranges for cursors and index scans.
//!
//! Mirrors the IndexedDB range constructors: `bound`, `lower_bound`,
//! `upper_bound`, and `only`. Bounds are inclusive unless opened.

use std::ops::Bound;

use crate::key::Key;

/// A bounded (or half-bounded) range over keys.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRange {
    lower: Option<Key>,
    upper: Option<Key>,
    lower_open: bool,
    upper_open: bool,
}

impl KeyRange {
    /// Range with both ends, inclusive.
    pub fn bound(lower: impl Into<Key>, upper: impl Into<Key>) -> Self {
        Self::bound_with(lower, upper, false, false)
    }

    /// Range with both ends and explicit openness.
    pub fn bound_with(
        lower: impl Into<Key>,
        upper: impl Into<Key>,
        lower_open: bool,
        upper_open: bool,
    ) -> Self {
        Self {
            lower: Some(lower.into()),
            upper: Some(upper.into()),
            lower_open,
            upper_open,
        }
    }

    /// Everything at or above `key`.
    pub fn lower_bound(key: impl Into<Key>) -> Self {
        Self {
            lower: Some(key.into()),
            upper: None,
            lower_open: false,
            upper_open: false,
        }
    }

    /// Everything at or below `key`.
    pub fn upper_bound(key: impl Into<Key>) -> Self {
        Self {
            lower: None,
            upper: Some(key.into()),
            lower_open: false,
            upper_open: false,
        }
    }

    /// Exactly `key`.
    pub fn only(key: impl Into<Key>) -> Self {
        let key = key.into();
        Self {
            lower: Some(key.clone()),
            upper: Some(key),
            lower_open: false,
            upper_open: false,
        }
    }

    /// Whether `key` falls inside the range.
    pub fn contains(&self, key: &Key) -> bool {
        if let Some(ref lower) = self.lower {
            if key < lower || (self.lower_open && key == lower) {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            if key > upper || (self.upper_open && key == upper) {
                return false;
            }
        }
        true
    }

    /// Whether no key can satisfy the range (inverted or fully open-empty
    /// bounds). `BTreeMap::range` panics on such inputs, so callers check
    /// this first.
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lo), Some(hi)) => lo > hi || (lo == hi && (self.lower_open || self.upper_open)),
            _ => false,
        }
    }

    /// Bounds usable with `BTreeMap::range`.
    pub fn bounds(&self) -> (Bound<&Key>, Bound<&Key>) {
        let lower = match (&self.lower, self.lower_open) {
            (Some(key), false) => Bound::Included(key),
            (Some(key), true) => Bound::Excluded(key),
            (None, _) => Bound::Unbounded,
        };
        let upper = match (&self.upper, self.upper_open) {
            (Some(key), false) => Bound::Included(key),
            (Some(key), true) => Bound::Excluded(key),
            (None, _) => Bound::Unbounded,
        };
        (lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_inclusive() {
        let range = KeyRange::bound(50.0, 300.0);
        assert!(range.contains(&Key::Number(50.0)));
        assert!(range.contains(&Key::Number(299.99)));
        assert!(range.contains(&Key::Number(300.0)));
        assert!(!range.contains(&Key::Number(49.99)));
        assert!(!range.contains(&Key::Number(300.01)));
    }

    #[test]
    fn test_bound_open_ends() {
        let range = KeyRange::bound_with(50.0, 300.0, true, true);
        assert!(!range.contains(&Key::Number(50.0)));
        assert!(!range.contains(&Key::Number(300.0)));
        assert!(range.contains(&Key::Number(150.0)));
    }

    #[test]
    fn test_half_bounded() {
        let lower = KeyRange::lower_bound(100.0);
        assert!(lower.contains(&Key::Number(100.0)));
        assert!(lower.contains(&Key::Number(1e6)));
        assert!(!lower.contains(&Key::Number(99.0)));

        let upper = KeyRange::upper_bound(100.0);
        assert!(upper.contains(&Key::Number(100.0)));
        assert!(upper.contains(&Key::Number(0.0)));
        assert!(!upper.contains(&Key::Number(101.0)));
    }

    #[test]
    fn test_empty_ranges() {
        assert!(KeyRange::bound(300.0, 50.0).is_empty());
        assert!(KeyRange::bound_with(50.0, 50.0, true, false).is_empty());
        assert!(!KeyRange::bound(50.0, 50.0).is_empty());
        assert!(!KeyRange::lower_bound(50.0).is_empty());
    }

    #[test]
    fn test_only() {
        let range = KeyRange::only("A very comfy couch");
        assert!(range.contains(&Key::Text("A very comfy couch".to_string())));
        assert!(!range.contains(&Key::Text("A plush recliner armchair".to_string())));
    }
}
