//! YAML decoding into document trees.
//!
//! ```rust
//! use yml2props::{from_yaml_str, Value};
//!
//! let doc = from_yaml_str("server:\n  port: 8080\n").unwrap();
//! let server = doc.as_mapping().unwrap().get("server").unwrap();
//! assert_eq!(server.as_mapping().unwrap().get("port"), Some(&Value::from(8080)));
//! ```
//!
//! Decoding follows the YAML 1.2 core schema: `yes`/`no`/`on`/`off` stay
//! strings, and timestamps stay strings in their original spelling. Merge keys
//! (`<<: *anchor`) are resolved, and custom tags are dropped in favour of the
//! tagged value.

use crate::{Error, Mapping, Number, Result, Value};
use serde::Serialize;
use serde_yaml::Value as Yaml;

/// Parses a single YAML document into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Yaml`] for malformed YAML or a stream with more than one
/// document, and [`Error::UnsupportedKey`] for a mapping key that is itself a
/// sequence or mapping.
pub fn from_yaml_str(text: &str) -> Result<Value> {
    if is_blank_document(text) {
        return Ok(Value::Null);
    }
    let mut yaml: Yaml = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    from_yaml_value(yaml)
}

/// True for input with no content: only blank lines, comments and document
/// markers.
fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Converts any serializable value into a [`Value`] tree.
///
/// ```rust
/// use serde::Serialize;
/// use yml2props::to_value;
///
/// #[derive(Serialize)]
/// struct Server { host: String, ports: Vec<u16> }
///
/// let value = to_value(&Server { host: "localhost".into(), ports: vec![80, 443] }).unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns [`Error::Yaml`] if `value` fails to serialize, and
/// [`Error::UnsupportedKey`] for maps keyed by non-scalar values.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    from_yaml_value(serde_yaml::to_value(value)?)
}

fn from_yaml_value(yaml: Yaml) -> Result<Value> {
    convert(yaml, "")
}

/// `path` is the dotted location of `yaml`, used only in error messages.
fn convert(yaml: Yaml, path: &str) -> Result<Value> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => Value::Number(convert_number(&n)),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| convert(item, &format!("{}[{}]", path, i)))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut mapping = Mapping::with_capacity(entries.len());
            for (key, value) in entries {
                let key = key_text(key, path)?;
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let value = convert(value, &child_path)?;
                mapping.insert(key, value);
            }
            Value::Mapping(mapping)
        }
        Yaml::Tagged(tagged) => convert(tagged.value, path)?,
    })
}

fn convert_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Number::Unsigned(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Scalar keys use the same text as scalar values, so `1: a` yields key `1`.
fn key_text(key: Yaml, path: &str) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Tagged(tagged) => key_text(tagged.value, path),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            let shown = serde_yaml::to_string(&key)
                .map(|s| s.trim_end().replace('\n', " "))
                .unwrap_or_else(|_| "<complex key>".to_string());
            Err(Error::unsupported_key(path, shown))
        }
        scalar => Ok(convert(scalar, path)?.to_string()),
    }
}
