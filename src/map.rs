//! Ordered map types.
//!
//! This module provides two wrappers around [`IndexMap`]:
//!
//! - [`Mapping`]: the children of a [`Value::Mapping`](crate::Value::Mapping) node
//! - [`PropertiesMap`]: the flattened `key -> value` store produced by
//!   [`flatten`](crate::flatten) and consumed by the properties writer
//!
//! Both keep insertion order, so a document flattens to the same key order it
//! was written in and two runs over the same input produce identical files.
//!
//! ## Examples
//!
//! ```rust
//! use yml2props::PropertiesMap;
//!
//! let mut props = PropertiesMap::new();
//! props.insert("server.port".to_string(), "8080".to_string());
//! props.insert("server.host".to_string(), "localhost".to_string());
//!
//! let keys: Vec<_> = props.keys().cloned().collect();
//! assert_eq!(keys, vec!["server.port", "server.host"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to tree values.
///
/// # Examples
///
/// ```rust
/// use yml2props::{Mapping, Value};
///
/// let mut map = Mapping::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    /// Creates an empty `Mapping`.
    #[must_use]
    pub fn new() -> Self {
        Mapping(IndexMap::new())
    }

    /// Creates an empty `Mapping` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Mapping(IndexMap::from_iter(iter))
    }
}

/// The flattened output of one conversion: fully-qualified keys mapped to
/// their string values.
///
/// Inserting an existing key overwrites its value in place, so the entry keeps
/// the position where the key was first produced.
///
/// # Examples
///
/// ```rust
/// use yml2props::PropertiesMap;
///
/// let mut props = PropertiesMap::new();
/// props.insert("a".to_string(), "1".to_string());
/// props.insert("b".to_string(), "2".to_string());
/// assert_eq!(props.insert("a".to_string(), "3".to_string()), Some("1".to_string()));
///
/// let pairs: Vec<_> = props.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
/// assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertiesMap(IndexMap<String, String>);

impl PropertiesMap {
    #[must_use]
    pub fn new() -> Self {
        PropertiesMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PropertiesMap(IndexMap::with_capacity(capacity))
    }

    /// Records an entry, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    /// Returns the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yml2props::PropertiesMap;
    ///
    /// let mut props = PropertiesMap::new();
    /// props.insert("foo.bar".to_string(), "42".to_string());
    /// assert_eq!(props.get("foo.bar"), Some("42"));
    /// assert_eq!(props.get("foo"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Reorders the entries lexicographically by key.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }
}

impl IntoIterator for PropertiesMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertiesMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for PropertiesMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        PropertiesMap(IndexMap::from_iter(iter))
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for PropertiesMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}
