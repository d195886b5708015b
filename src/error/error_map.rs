//! The error map produced by validation.
//!
//! [`ErrorMap`] maps a rendered field path to a single human-readable message.
//! Maps produced by sibling validations are combined with [`ErrorMap::merge`],
//! where the right-hand side wins on key collision.

use std::fmt::{self, Display};

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use serde::Serialize;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// A mapping from field path to validation message.
///
/// Insertion order is kept so serialized responses are deterministic, but it
/// carries no meaning. Keys are unique: inserting an existing key replaces
/// its message.
///
/// # Example
///
/// ```rust
/// use bodyguard::{ErrorMap, FieldPath};
///
/// let left = ErrorMap::single(&FieldPath::from_field("a"), "is required");
/// let right = ErrorMap::single(&FieldPath::from_field("a"), "must be of type string");
///
/// let merged = left.merge(right);
/// assert_eq!(merged.get("a"), Some("must be of type string"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, String>);

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding one message at `path`.
    pub fn single(path: &FieldPath, message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(path.to_string(), message);
        map
    }

    /// Inserts a message, replacing any message already stored at `key`.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    /// Returns the union of both maps. Entries from `other` overwrite
    /// entries from `self` that share a key.
    pub fn merge(mut self, other: ErrorMap) -> Self {
        self.extend(other);
        self
    }

    /// Returns the message stored at `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if a message is stored at `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over `(path, message)` pairs.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    /// Returns the rendered paths that carry an error.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Converts this map into the underlying `IndexMap`.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }

    /// Renders the map as a compact JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

impl Semigroup for ErrorMap {
    fn combine(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl Extend<(String, String)> for ErrorMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        for (key, message) in iter {
            self.0.insert(key, message);
        }
    }
}

impl FromIterator<(String, String)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ErrorMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, String);
    type IntoIter = IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorMap>();
    assert_sync::<ErrorMap>();
};
