//! Character encodings for reading YAML input and writing property files.
//!
//! [`Charset`] covers the standard set every Java runtime ships with, which is
//! what consumers of `.properties` files expect to be able to read:
//! `UTF-8`, `US-ASCII`, `ISO-8859-1`, `UTF-16BE`, `UTF-16LE` and `UTF-16`.
//!
//! Decoding is lossy by contract: bytes that are not valid in the chosen
//! charset become U+FFFD, so reading a file with the wrong charset yields
//! visibly corrupted text instead of an error.
//!
//! ```rust
//! use yml2props::Charset;
//!
//! let latin1: Charset = "ISO-8859-1".parse().unwrap();
//! let bytes = latin1.encode("caractères");
//! assert_eq!(bytes.len(), 10);
//! assert_eq!(latin1.decode(&bytes), "caractères");
//!
//! // The same bytes read as UTF-8 are corrupted, not rejected.
//! assert_ne!(Charset::Utf8.decode(&bytes), "caractères");
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

const BOM: char = '\u{FEFF}';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    #[default]
    Utf8,
    UsAscii,
    Iso8859_1,
    Utf16Be,
    Utf16Le,
    /// Big-endian with a byte-order mark on output; honors a BOM on input.
    Utf16,
}

impl Charset {
    /// Returns the canonical name of this charset.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16 => "UTF-16",
        }
    }

    /// Returns `true` if `ch` can be written in this charset as-is.
    ///
    /// ```rust
    /// use yml2props::Charset;
    ///
    /// assert!(Charset::Iso8859_1.can_encode('é'));
    /// assert!(!Charset::UsAscii.can_encode('é'));
    /// assert!(!Charset::Iso8859_1.can_encode('€'));
    /// ```
    #[inline]
    #[must_use]
    pub const fn can_encode(&self, ch: char) -> bool {
        match self {
            Charset::UsAscii => (ch as u32) < 0x80,
            Charset::Iso8859_1 => (ch as u32) < 0x100,
            Charset::Utf8 | Charset::Utf16Be | Charset::Utf16Le | Charset::Utf16 => true,
        }
    }

    /// Decodes `bytes`, replacing malformed input with U+FFFD and dropping a
    /// leading byte-order mark.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut text = match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| if b < 0x80 { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            Charset::Utf16 => match bytes {
                // The byte-order mark is consumed here; a second one is text.
                [0xFF, 0xFE, rest @ ..] => return decode_utf16(rest, u16::from_le_bytes),
                [0xFE, 0xFF, rest @ ..] => return decode_utf16(rest, u16::from_be_bytes),
                _ => decode_utf16(bytes, u16::from_be_bytes),
            },
        };
        if text.starts_with(BOM) {
            text.replace_range(..BOM.len_utf8(), "");
        }
        text
    }

    /// Encodes `text`; characters this charset cannot represent become `?`.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::UsAscii | Charset::Iso8859_1 => text
                .chars()
                .map(|ch| if self.can_encode(ch) { ch as u8 } else { b'?' })
                .collect(),
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::Utf16 => [0xFE, 0xFF]
                .into_iter()
                .chain(text.encode_utf16().flat_map(u16::to_be_bytes))
                .collect(),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let mut text: String = char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

impl FromStr for Charset {
    type Err = Error;

    /// Parses a charset name, ignoring case, `-` and `_`.
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Charset::Utf8),
            "usascii" | "ascii" => Ok(Charset::UsAscii),
            "iso88591" | "latin1" | "l1" => Ok(Charset::Iso8859_1),
            "utf16be" => Ok(Charset::Utf16Be),
            "utf16le" => Ok(Charset::Utf16Le),
            "utf16" => Ok(Charset::Utf16),
            _ => Err(Error::UnsupportedCharset(name.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
