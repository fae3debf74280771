//! # Timber Common
//!
//! Shared utilities for the Timber storage crates: logging setup and small
//! error-handling helpers used across the engine and the applications built
//! on it.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};

/// Extension trait for `Option` lookups that should surface a named error.
pub trait OptionExt<T> {
    /// Convert `None` into `E(built from the resource name)`.
    fn ok_or_missing<E>(self, resource: impl Into<String>, make: impl FnOnce(String) -> E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing<E>(self, resource: impl Into<String>, make: impl FnOnce(String) -> E) -> Result<T, E> {
        self.ok_or_else(|| make(resource.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Missing(String);

    #[test]
    fn test_option_ext_some() {
        let value: Option<u32> = Some(7);
        assert_eq!(value.ok_or_missing("store", Missing), Ok(7));
    }

    #[test]
    fn test_option_ext_none() {
        let value: Option<u32> = None;
        assert_eq!(
            value.ok_or_missing("store", Missing),
            Err(Missing("store".to_string()))
        );
    }
}
