//! Typed access to resolved properties
//!
//! The `Properties` trait adds parsing helpers on top of any string to
//! string lookup. Optional accessors return `None` for absent keys; the
//! `_required` variants turn absence into `PropertyError::NotFound`.

use std::collections::{BTreeMap, HashMap};
use std::num::ParseIntError;

use thiserror::Error;

use crate::types::PropertyMap;

/// Errors raised by typed property accessors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Property '{key}' not found")]
    NotFound { key: String },

    #[error("Property '{key}' contains an empty value")]
    EmptyValue { key: String },

    #[error("Property '{key}' contains an invalid integer: '{value}'")]
    InvalidInteger {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Property '{key}' contains an invalid long: '{value}'")]
    InvalidLong {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl PropertyError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// The property key the error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound { key }
            | Self::EmptyValue { key }
            | Self::InvalidInteger { key, .. }
            | Self::InvalidLong { key, .. } => key,
        }
    }
}

pub type PropertyResult<T> = Result<T, PropertyError>;

/// Typed accessors over a flat string mapping
///
/// Only `get_property` must be implemented.
///
/// # Example
///
/// ```
/// use propstack_core::accessors::Properties;
/// use propstack_core::PropertyMap;
///
/// let properties: PropertyMap = [("server.port", "8080"), ("debug", "TRUE")].into_iter().collect();
///
/// assert_eq!(properties.int_required("server.port").unwrap(), 8080);
/// assert_eq!(properties.boolean("debug"), Some(true));
/// assert!(properties.string_not_null("missing").is_err());
/// ```
pub trait Properties {
    /// Raw value lookup
    fn get_property(&self, key: &str) -> Option<&str>;

    fn string(&self, key: &str) -> Option<&str> {
        self.get_property(key)
    }

    /// Value of a key that must exist; an empty value is accepted
    fn string_not_null(&self, key: &str) -> PropertyResult<&str> {
        self.get_property(key).ok_or_else(|| PropertyError::not_found(key))
    }

    /// Value of a key that must exist and be non-empty
    fn string_not_empty(&self, key: &str) -> PropertyResult<&str> {
        let value = self.string_not_null(key)?;
        if value.is_empty() {
            return Err(PropertyError::EmptyValue { key: key.to_string() });
        }
        Ok(value)
    }

    /// Base-10 `i32`; `Ok(None)` when absent
    fn int(&self, key: &str) -> PropertyResult<Option<i32>> {
        self.get_property(key)
            .map(|value| {
                value.parse::<i32>().map_err(|source| PropertyError::InvalidInteger {
                    key: key.to_string(),
                    value: value.to_string(),
                    source,
                })
            })
            .transpose()
    }

    fn int_required(&self, key: &str) -> PropertyResult<i32> {
        self.int(key)?.ok_or_else(|| PropertyError::not_found(key))
    }

    /// Base-10 `i64`; `Ok(None)` when absent
    fn long(&self, key: &str) -> PropertyResult<Option<i64>> {
        self.get_property(key)
            .map(|value| {
                value.parse::<i64>().map_err(|source| PropertyError::InvalidLong {
                    key: key.to_string(),
                    value: value.to_string(),
                    source,
                })
            })
            .transpose()
    }

    fn long_required(&self, key: &str) -> PropertyResult<i64> {
        self.long(key)?.ok_or_else(|| PropertyError::not_found(key))
    }

    /// `true` only for "true" in any ASCII case, `false` for any other value
    fn boolean(&self, key: &str) -> Option<bool> {
        self.get_property(key).map(|value| value.eq_ignore_ascii_case("true"))
    }

    fn boolean_required(&self, key: &str) -> PropertyResult<bool> {
        self.boolean(key).ok_or_else(|| PropertyError::not_found(key))
    }
}

impl Properties for PropertyMap {
    fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl Properties for HashMap<String, String> {
    fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Properties for BTreeMap<String, String> {
    fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}
