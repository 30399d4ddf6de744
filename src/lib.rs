//! # yml2props
//!
//! Converts hierarchical YAML documents into flat `.properties` files, the
//! format read by Java-style runtime configuration loaders.
//!
//! ## Key naming
//!
//! Every scalar leaf of a document becomes one property. Its key is the path
//! to the leaf: mapping keys joined with `.`, sequence positions as `[index]`.
//!
//! ```yaml
//! root:
//!   foo:
//!     bar: 42
//!     items:
//!       - prop1: v1
//!       - prop1: v2
//! ```
//!
//! becomes
//!
//! ```text
//! root.foo.bar=42
//! root.foo.items[0].prop1=v1
//! root.foo.items[1].prop1=v2
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use yml2props::{convert_str, FlattenOptions, PropertiesOptions};
//!
//! let yaml = "server:\n  port: 8080\n  hosts: [a, b]\n";
//! let text = convert_str(yaml, &FlattenOptions::default(), &PropertiesOptions::default()).unwrap();
//! assert_eq!(text, "server.port=8080\nserver.hosts[0]=a\nserver.hosts[1]=b\n");
//! ```
//!
//! ### Step by step
//!
//! ```rust
//! use yml2props::{flatten, from_str, from_yaml_str, to_string, PropertiesOptions};
//!
//! let tree = from_yaml_str("name: Zoë\npath: C:\\tmp\n").unwrap();
//! let props = flatten(&tree);
//! let text = to_string(&props, &PropertiesOptions::default());
//! assert_eq!(text, "name=Zoë\npath=C\\:\\\\tmp\n");
//!
//! // The output reads back to the same entries.
//! assert_eq!(from_str(&text).unwrap(), props);
//! ```
//!
//! ### Directories
//!
//! [`Converter`] converts every file under a directory matched by Ant-style
//! include patterns, writing `name.properties` next to each `name.yml`. See
//! the [`convert`] module.
//!
//! ## Modules
//!
//! - [`flatten`](mod@flatten): the key-composition algorithm
//! - [`yaml`]: YAML decoding into [`Value`] trees
//! - [`ser`] / [`de`]: writing and reading `.properties` text
//! - [`charset`]: input and output encodings
//! - [`scan`]: include patterns and file discovery
//! - [`convert`]: the batch driver

pub mod charset;
pub mod cli;
pub mod convert;
pub mod de;
pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod options;
pub mod scan;
pub mod ser;
pub mod value;
pub mod yaml;

pub use charset::Charset;
pub use convert::{ConversionReport, ConvertOptions, Converted, Converter};
pub use de::from_str;
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_with};
pub use map::{Mapping, PropertiesMap};
pub use options::{FlattenOptions, KeyOrder, PropertiesOptions, Timestamp};
pub use scan::{scan, IncludePatterns};
pub use ser::Serializer;
pub use value::{Number, Value};
pub use yaml::{from_yaml_str, to_value};

use serde::Serialize;
use std::io;

/// Serializes `properties` to `.properties` text, header included.
///
/// The text only contains characters `options.charset` can represent; use
/// [`to_vec`] to get the encoded bytes.
#[must_use]
pub fn to_string(properties: &PropertiesMap, options: &PropertiesOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_header();
    serializer.write_properties(properties);
    serializer.into_inner()
}

/// Serializes `properties` and encodes the text with `options.charset`.
///
/// # Examples
///
/// ```rust
/// use yml2props::{to_vec, Charset, PropertiesMap, PropertiesOptions};
///
/// let props = PropertiesMap::from([("k", "é€")]);
/// let bytes = to_vec(&props, &PropertiesOptions::new().with_charset(Charset::Iso8859_1));
/// assert_eq!(bytes, b"k=\xE9\\u20AC\n".to_vec());
/// ```
#[must_use]
pub fn to_vec(properties: &PropertiesMap, options: &PropertiesOptions) -> Vec<u8> {
    options.charset.encode(&to_string(properties, options))
}

/// Writes `properties` to `writer`, encoded with `options.charset`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W>(mut writer: W, properties: &PropertiesMap, options: &PropertiesOptions) -> Result<()>
where
    W: io::Write,
{
    writer.write_all(&to_vec(properties, options))?;
    writer.flush()?;
    Ok(())
}

/// Flattens any serializable value into properties.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use yml2props::to_properties;
///
/// #[derive(Serialize)]
/// struct Datasource { url: String, pool: Vec<u32> }
///
/// let props = to_properties(&Datasource { url: "jdbc:h2:mem".into(), pool: vec![5, 5] }).unwrap();
/// assert_eq!(props.get("url"), Some("jdbc:h2:mem"));
/// assert_eq!(props.get("pool[1]"), Some("5"));
/// ```
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as a tree.
pub fn to_properties<T>(value: &T) -> Result<PropertiesMap>
where
    T: ?Sized + Serialize,
{
    Ok(flatten(&to_value(value)?))
}

/// Converts YAML text to `.properties` text in one step.
///
/// # Errors
///
/// Returns [`Error::Yaml`] or [`Error::UnsupportedKey`] if the YAML cannot be
/// decoded.
pub fn convert_str(
    yaml: &str,
    flatten_options: &FlattenOptions,
    options: &PropertiesOptions,
) -> Result<String> {
    let tree = from_yaml_str(yaml)?;
    Ok(to_string(&flatten_with(&tree, flatten_options), options))
}
