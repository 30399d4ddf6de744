//! Configuration options for flattening and writing property files.
//!
//! - [`FlattenOptions`]: how scalar leaves are turned into text
//! - [`PropertiesOptions`]: how entries are written (charset, header, order)
//!
//! ## Examples
//!
//! ```rust
//! use yml2props::{Charset, KeyOrder, PropertiesOptions};
//!
//! let options = PropertiesOptions::new()
//!     .with_charset(Charset::Iso8859_1)
//!     .with_comment("generated from application.yml")
//!     .with_key_order(KeyOrder::Sorted);
//! assert_eq!(options.charset, Charset::Iso8859_1);
//! ```

use crate::Charset;
use chrono::{DateTime, Utc};

/// Controls scalar-to-text conversion during flattening.
///
/// # Examples
///
/// ```rust
/// use yml2props::{flatten_with, tree, FlattenOptions};
///
/// let doc = tree!({ "unset": null });
/// let props = flatten_with(&doc, &FlattenOptions::new().with_null_value(""));
/// assert_eq!(props.get("unset"), Some(""));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Text recorded for null leaves. Defaults to `null`.
    pub null_value: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            null_value: "null".to_string(),
        }
    }
}

impl FlattenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_null_value(mut self, null_value: impl Into<String>) -> Self {
        self.null_value = null_value.into();
        self
    }
}

/// Order in which entries are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// The order in which keys were produced from the document.
    #[default]
    Document,
    /// Lexicographic by key.
    Sorted,
}

/// Whether a `#<date>` line is written after the comment header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Timestamp {
    /// No date line; output depends only on the input.
    #[default]
    None,
    /// The current time at serialization.
    Now,
    /// A fixed instant.
    Fixed(DateTime<Utc>),
}

/// Configuration for the properties writer.
///
/// # Examples
///
/// ```rust
/// use yml2props::{Charset, PropertiesOptions, Timestamp};
///
/// let options = PropertiesOptions::new();
/// assert_eq!(options.charset, Charset::Utf8);
/// assert_eq!(options.comment, None);
/// assert_eq!(options.timestamp, Timestamp::None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesOptions {
    pub charset: Charset,
    pub comment: Option<String>,
    pub timestamp: Timestamp,
    pub key_order: KeyOrder,
}

impl PropertiesOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output charset. Characters it cannot represent are written
    /// as `\uXXXX` escapes.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Sets a header comment; every line of it is written prefixed with `#`.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }
}
