//! Error types for conversion.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed YAML ([`Error::Yaml`]) or malformed
//!   `.properties` text ([`Error::Syntax`]), with line/column information
//! - **Input shape**: mapping keys that cannot become a property key
//! - **Configuration**: unknown charset names and invalid include patterns
//! - **I/O errors**: reading, writing or deleting files
//! - **Batch errors**: a per-file failure wrapped with its path, and the
//!   summary failure returned once a batch is done
//!
//! ## Examples
//!
//! ```rust
//! use yml2props::{from_yaml_str, Error};
//!
//! let result = from_yaml_str("key: [unclosed");
//! assert!(matches!(result, Err(Error::Yaml { .. })));
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading, writing or deleting
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed YAML input
    #[error("YAML parse error{}: {msg}", format_location(.location))]
    Yaml {
        msg: String,
        location: Option<(usize, usize)>,
    },

    /// Malformed `.properties` input
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A mapping key that has no scalar text form
    #[error("Unsupported mapping key {key} at '{path}': keys must be scalars")]
    UnsupportedKey { path: String, key: String },

    /// Unknown charset name
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Include pattern that cannot be compiled
    #[error("Invalid include pattern '{pattern}': {msg}")]
    InvalidPattern { pattern: String, msg: String },

    /// Conversion target is the source file itself
    #[error("Refusing to overwrite input file {}", .0.display())]
    SameFile(PathBuf),

    /// Several inputs of a batch would be written to the same output
    #[error("Output {} would be written by several inputs: {}", .target.display(), format_paths(.sources))]
    TargetConflict { target: PathBuf, sources: Vec<PathBuf> },

    /// A single file of a batch failed
    #[error("Failed to convert {}: {source}", .path.display())]
    Conversion {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// At least one file of a batch failed
    #[error("{failed} of {total} file(s) failed to convert")]
    BatchFailed { failed: usize, total: usize },
}

fn format_location(location: &Option<(usize, usize)>) -> String {
    match location {
        Some((line, col)) => format!(" at line {}, column {}", line, col),
        None => String::new(),
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Creates a syntax error for `.properties` input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yml2props::Error;
    ///
    /// let err = Error::syntax(3, 7, "malformed \\uxxxx encoding");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    pub fn unsupported_key(path: &str, key: impl fmt::Display) -> Self {
        Error::UnsupportedKey {
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    pub fn invalid_pattern(pattern: &str, msg: impl fmt::Display) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an I/O error that names the file involved.
    pub fn io_at(path: &std::path::Path, err: &std::io::Error) -> Self {
        Error::Io(format!("{}: {}", path.display(), err))
    }

    /// Wraps a per-file failure with the path of the file.
    pub fn conversion(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Conversion {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            location: err.location().map(|loc| (loc.line(), loc.column())),
            msg: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
