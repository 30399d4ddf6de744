//! Document tree representation.
//!
//! This module provides the [`Value`] enum, the generic tree a YAML document is
//! decoded into before flattening. A tree is always one of three shapes:
//!
//! - a **mapping** of string keys to child values ([`Value::Mapping`])
//! - a **sequence** of child values ([`Value::Sequence`])
//! - a **scalar** leaf: null, boolean, number or string
//!
//! ## Creating Values
//!
//! ```rust
//! use yml2props::{tree, Value};
//!
//! let null = Value::Null;
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let doc = tree!({
//!     "server": { "port": 8080 }
//! });
//! assert!(doc.is_mapping());
//! ```
//!
//! ## Scalar text
//!
//! Every scalar has a canonical text form, used verbatim as the property value:
//!
//! ```rust
//! use yml2props::Value;
//!
//! assert_eq!(Value::from(42).to_string(), "42");
//! assert_eq!(Value::from(true).to_string(), "true");
//! assert_eq!(Value::from(1.0).to_string(), "1.0");
//! assert_eq!(Value::Null.to_string(), "null");
//! ```

use crate::Mapping;
use std::fmt;

/// A decoded document tree.
///
/// # Examples
///
/// ```rust
/// use yml2props::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_scalar());
/// assert!(text.is_scalar());
/// assert!(!Value::Sequence(vec![]).is_scalar());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// A numeric scalar.
///
/// YAML integers that fit in `i64` are [`Number::Integer`]; larger positive
/// integers are kept exactly as [`Number::Unsigned`].
///
/// # Examples
///
/// ```rust
/// use yml2props::Number;
///
/// assert_eq!(Number::Integer(-7).to_string(), "-7");
/// assert_eq!(Number::Unsigned(u64::MAX).to_string(), "18446744073709551615");
/// assert_eq!(Number::Float(2.5).to_string(), "2.5");
/// assert_eq!(Number::Float(f64::INFINITY).to_string(), "Infinity");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

/// Writes a float in a locale-independent form that always reads back as a
/// floating-point number: integral values keep a `.0`, non-finite values use
/// the `Infinity` / `NaN` spellings.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{:?}", value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write_float(f, *fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Unsigned(value),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns `true` for leaves: null, booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// If the value is a mapping, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Counts the scalar leaves of this tree.
    ///
    /// A tree without key collisions flattens to exactly this many entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yml2props::tree;
    ///
    /// let doc = tree!({ "a": [1, 2], "b": { "c": null }, "d": {} });
    /// assert_eq!(doc.leaf_count(), 3);
    /// ```
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Value::Mapping(map) => map.values().map(Value::leaf_count).sum(),
            Value::Sequence(items) => items.iter().map(Value::leaf_count).sum(),
            _ => 1,
        }
    }
}

impl fmt::Display for Value {
    /// Scalars render in their canonical property-value form; collections
    /// render in a compact flow style, which only shows up in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_text_is_locale_independent() {
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(0.5).to_string(), "0.5");
        assert_eq!(Number::Float(-3.25).to_string(), "-3.25");
        assert_eq!(Number::Float(1e20).to_string(), "1e20");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_integer_text() {
        assert_eq!(Number::Integer(0).to_string(), "0");
        assert_eq!(Number::Integer(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(Number::from(u64::MAX), Number::Unsigned(u64::MAX));
        assert_eq!(Number::from(5u64), Number::Integer(5));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("a=b").to_string(), "a=b");
    }

    #[test]
    fn test_collection_display() {
        let mut map = Mapping::new();
        map.insert("k".to_string(), Value::from(vec![Value::from(1), Value::Null]));
        assert_eq!(Value::Mapping(map).to_string(), "{k: [1, null]}");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_scalar(v: &Value) -> bool {
            v.is_scalar()
        }
        assert!(check_scalar(&Value::Null));
        assert!(!check_scalar(&Value::Sequence(vec![])));
        assert!(Value::Mapping(Mapping::new()).is_mapping());
    }

    #[test]
    fn test_leaf_count_ignores_empty_collections() {
        let mut map = Mapping::new();
        map.insert("empty".to_string(), Value::Sequence(vec![]));
        map.insert("also".to_string(), Value::Mapping(Mapping::new()));
        assert_eq!(Value::Mapping(map).leaf_count(), 0);
        assert_eq!(Value::from("x").leaf_count(), 1);
    }
}
