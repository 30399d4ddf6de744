//! Flattening of document trees into property entries.
//!
//! Keys are composed from the path to each scalar leaf:
//!
//! - a mapping entry appends `.key` (or just `key` at the root)
//! - a sequence element appends `[index]`, its position in the sequence
//!
//! ```rust
//! use yml2props::{flatten, tree};
//!
//! let doc = tree!({
//!     "root": {
//!         "foo": {
//!             "bar": 42,
//!             "items": [{ "prop1": "v1" }, { "prop1": "v2" }]
//!         }
//!     }
//! });
//!
//! let props = flatten(&doc);
//! assert_eq!(props.len(), 3);
//! assert_eq!(props.get("root.foo.bar"), Some("42"));
//! assert_eq!(props.get("root.foo.items[0].prop1"), Some("v1"));
//! assert_eq!(props.get("root.foo.items[1].prop1"), Some("v2"));
//! ```

use crate::{FlattenOptions, PropertiesMap, Value};

/// Flattens `value` with the default options (null leaves become `null`).
#[must_use]
pub fn flatten(value: &Value) -> PropertiesMap {
    flatten_with(value, &FlattenOptions::default())
}

/// Flattens `value` into one entry per scalar leaf.
///
/// A null root is an empty document and yields no entries; any other scalar
/// root yields a single entry with an empty key. When two leaves produce the
/// same key, the later one wins.
#[must_use]
pub fn flatten_with(value: &Value, options: &FlattenOptions) -> PropertiesMap {
    let mut properties = PropertiesMap::with_capacity(value.leaf_count());
    if !value.is_null() {
        let mut prefix = String::new();
        visit(value, &mut prefix, options, &mut properties);
    }
    properties
}

/// Walks `node`, reusing one prefix buffer: every branch appends its segment,
/// recurses, then truncates back.
fn visit(node: &Value, prefix: &mut String, options: &FlattenOptions, out: &mut PropertiesMap) {
    let base = prefix.len();
    match node {
        Value::Mapping(map) => {
            for (key, child) in map {
                if base > 0 {
                    prefix.push('.');
                }
                prefix.push_str(key);
                visit(child, prefix, options, out);
                prefix.truncate(base);
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                push_index(prefix, index);
                visit(child, prefix, options, out);
                prefix.truncate(base);
            }
        }
        Value::Null => {
            out.insert(prefix.clone(), options.null_value.clone());
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            out.insert(prefix.clone(), node.to_string());
        }
    }
}

fn push_index(prefix: &mut String, index: usize) {
    use std::fmt::Write;
    // Writing to a String cannot fail.
    let _ = write!(prefix, "[{}]", index);
}
