//! `.properties` serialization.
//!
//! The [`Serializer`] writes one `key=value` line per entry, escaping text the
//! way `java.util.Properties` expects to read it back:
//!
//! - `\`, `=`, `:`, `#` and `!` are backslash-escaped
//! - tab, newline, carriage return and form feed become `\t`, `\n`, `\r`, `\f`
//! - spaces are escaped everywhere in keys, and only in leading position in values
//! - other control characters, and characters the output charset cannot
//!   represent, become `\uXXXX` escapes
//!
//! ## Usage
//!
//! ```rust
//! use yml2props::{to_string, PropertiesMap, PropertiesOptions};
//!
//! let props = PropertiesMap::from([("greeting", "hello world"), ("url", "http://x")]);
//! let text = to_string(&props, &PropertiesOptions::default());
//! assert_eq!(text, "greeting=hello world\nurl=http\\://x\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use yml2props::{Charset, PropertiesOptions, Serializer};
//!
//! let mut serializer = Serializer::new(PropertiesOptions::new().with_charset(Charset::UsAscii));
//! serializer.write_entry("name", "Zoë");
//! assert_eq!(serializer.into_inner(), "name=Zo\\u00EB\n");
//! ```

use crate::{Charset, KeyOrder, PropertiesMap, PropertiesOptions, Timestamp};
use chrono::{DateTime, Utc};

const LINE_ENDING: &str = "\n";

/// Writes property entries as text.
///
/// The returned text is not yet encoded: it only contains characters the
/// configured charset can represent, so [`Charset::encode`] is lossless on it.
pub struct Serializer {
    output: String,
    options: PropertiesOptions,
}

impl Serializer {
    pub fn new(options: PropertiesOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the comment and date lines, if configured.
    pub fn write_header(&mut self) {
        if let Some(comment) = self.options.comment.clone() {
            self.write_comment(&comment);
        }
        let date = match &self.options.timestamp {
            Timestamp::None => None,
            Timestamp::Now => Some(Utc::now()),
            Timestamp::Fixed(date) => Some(*date),
        };
        if let Some(date) = date {
            self.output.push('#');
            self.output.push_str(&format_date(&date));
            self.output.push_str(LINE_ENDING);
        }
    }

    fn write_comment(&mut self, comment: &str) {
        for line in comment_lines(comment) {
            if !line.starts_with('#') && !line.starts_with('!') {
                self.output.push('#');
            }
            for ch in line.chars() {
                if ch.is_control() || !self.options.charset.can_encode(ch) {
                    push_unicode_escape(&mut self.output, ch);
                } else {
                    self.output.push(ch);
                }
            }
            self.output.push_str(LINE_ENDING);
        }
    }

    /// Writes a single `key=value` line.
    pub fn write_entry(&mut self, key: &str, value: &str) {
        let charset = self.options.charset;
        escape_into(&mut self.output, key, true, charset);
        self.output.push('=');
        escape_into(&mut self.output, value, false, charset);
        self.output.push_str(LINE_ENDING);
    }

    /// Writes every entry of `properties` in the configured key order.
    pub fn write_properties(&mut self, properties: &PropertiesMap) {
        if self.options.key_order == KeyOrder::Sorted {
            let mut sorted = properties.clone();
            sorted.sort_keys();
            self.write_entries(&sorted);
        } else {
            self.write_entries(properties);
        }
    }

    fn write_entries(&mut self, properties: &PropertiesMap) {
        for (key, value) in properties {
            self.write_entry(key, value);
        }
    }
}

/// Splits a comment on `\n`, `\r` and `\r\n`, the line breaks a reader
/// honors. A single trailing break does not add an empty line.
fn comment_lines(comment: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = comment
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
        .collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Formats a date the way `java.util.Date#toString` does, in UTC.
fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %H:%M:%S UTC %Y").to_string()
}

fn escape_into(out: &mut String, text: &str, is_key: bool, charset: Charset) {
    for (i, ch) in text.chars().enumerate() {
        match ch {
            ' ' => {
                if is_key || i == 0 {
                    out.push('\\');
                }
                out.push(' ');
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{000C}' => out.push_str("\\f"),
            '\\' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            _ if ch.is_control() || !charset.can_encode(ch) => push_unicode_escape(out, ch),
            _ => out.push(ch),
        }
    }
}

/// Characters outside the BMP are written as a surrogate pair.
fn push_unicode_escape(out: &mut String, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_str, to_string};
    use chrono::TimeZone;

    fn write(key: &str, value: &str, charset: Charset) -> String {
        let mut serializer = Serializer::new(PropertiesOptions::new().with_charset(charset));
        serializer.write_entry(key, value);
        serializer.into_inner()
    }

    #[test]
    fn test_separators_and_comment_chars_are_escaped() {
        assert_eq!(
            write("a=b:c", "#!x=y:z", Charset::Utf8),
            "a\\=b\\:c=\\#\\!x\\=y\\:z\n"
        );
    }

    #[test]
    fn test_backslash_is_escaped() {
        assert_eq!(write("path", "C:\\dir", Charset::Utf8), "path=C\\:\\\\dir\n");
    }

    #[test]
    fn test_space_handling() {
        assert_eq!(write("a b", " lead and inner", Charset::Utf8), "a\\ b=\\ lead and inner\n");
        assert_eq!(write("k", "trailing ", Charset::Utf8), "k=trailing \n");
    }

    #[test]
    fn test_whitespace_controls() {
        assert_eq!(write("k", "a\tb\nc\rd\u{000C}e", Charset::Utf8), "k=a\\tb\\nc\\rd\\fe\n");
        assert_eq!(write("k", "bell\u{0007}", Charset::Utf8), "k=bell\\u0007\n");
    }

    #[test]
    fn test_non_ascii_depends_on_charset() {
        assert_eq!(write("k", "é€", Charset::Utf8), "k=é€\n");
        assert_eq!(write("k", "é€", Charset::Iso8859_1), "k=é\\u20AC\n");
        assert_eq!(write("k", "é€", Charset::UsAscii), "k=\\u00E9\\u20AC\n");
    }

    #[test]
    fn test_supplementary_character_escape() {
        assert_eq!(write("k", "😀", Charset::UsAscii), "k=\\uD83D\\uDE00\n");
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(write("", "root", Charset::Utf8), "=root\n");
    }

    #[test]
    fn test_header() {
        let date = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 3).unwrap();
        let options = PropertiesOptions::new()
            .with_comment("generated\n# keep\nnaïve €")
            .with_charset(Charset::Iso8859_1)
            .with_timestamp(Timestamp::Fixed(date));
        let mut serializer = Serializer::new(options);
        serializer.write_header();
        assert_eq!(
            serializer.into_inner(),
            "#generated\n# keep\n#naïve \\u20AC\n#Mon Oct 19 08:05:03 UTC 2026\n"
        );
    }

    #[test]
    fn test_empty_comment_writes_bare_marker() {
        let mut serializer = Serializer::new(PropertiesOptions::new().with_comment(""));
        serializer.write_header();
        assert_eq!(serializer.into_inner(), "#\n");
    }

    #[test]
    fn test_comment_line_breaks_cannot_start_entries() {
        let props = PropertiesMap::from([("a", "1")]);
        for comment in ["a\rb=c", "a\r\nb=c", "a\nb=c"] {
            let text = to_string(&props, &PropertiesOptions::new().with_comment(comment));
            assert_eq!(text, "#a\n#b=c\na=1\n");
            assert_eq!(from_str(&text).unwrap(), props);
        }
    }

    #[test]
    fn test_comment_blank_lines_and_controls() {
        let mut serializer =
            Serializer::new(PropertiesOptions::new().with_comment("x\r\ry\tz\u{0007}\n"));
        serializer.write_header();
        assert_eq!(serializer.into_inner(), "#x\n#\n#y\\u0009z\\u0007\n");
    }

    #[test]
    fn test_sorted_key_order() {
        let props = PropertiesMap::from([("b", "1"), ("a", "2")]);
        let mut serializer =
            Serializer::new(PropertiesOptions::new().with_key_order(KeyOrder::Sorted));
        serializer.write_properties(&props);
        assert_eq!(serializer.into_inner(), "a=2\nb=1\n");
    }
}
