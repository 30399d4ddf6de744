//! `.properties` parsing.
//!
//! [`from_str`](crate::from_str) reads text in the format written by
//! [`Serializer`](crate::Serializer), following `java.util.Properties#load`:
//!
//! - blank lines and lines starting with `#` or `!` are ignored
//! - a line ending in an odd number of backslashes continues on the next line,
//!   whose leading whitespace is dropped
//! - the key ends at the first unescaped `=`, `:` or whitespace; whitespace and
//!   at most one `=`/`:` separate it from the value
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded; any other escaped
//!   character stands for itself
//!
//! ```rust
//! use yml2props::from_str;
//!
//! let props = from_str("# comment\nname = Alice\npath: C\\:\\\\tmp\nmulti=a \\\n    b\n").unwrap();
//! assert_eq!(props.get("name"), Some("Alice"));
//! assert_eq!(props.get("path"), Some("C:\\tmp"));
//! assert_eq!(props.get("multi"), Some("a b"));
//! ```

use crate::{Error, PropertiesMap, Result};

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000C}')
}

/// A logical line: one or more natural lines joined by continuations.
struct LogicalLine {
    /// 1-based number of the natural line it starts on.
    line: usize,
    chars: Vec<char>,
}

/// Splits `input` into natural lines on `\n`, `\r` or `\r\n`.
fn natural_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < input.len() {
        lines.push(&input[start..]);
    }
    lines
}

fn logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (index, natural) in natural_lines(input).into_iter().enumerate() {
        let trimmed = natural.trim_start_matches(is_blank);
        let mut logical = match current.take() {
            Some(logical) => logical,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                LogicalLine {
                    line: index + 1,
                    chars: Vec::new(),
                }
            }
        };
        logical.chars.extend(trimmed.chars());

        let trailing = logical.chars.iter().rev().take_while(|c| **c == '\\').count();
        if trailing % 2 == 1 {
            logical.chars.pop();
            current = Some(logical);
        } else {
            result.push(logical);
        }
    }
    // A continuation on the last line just ends the input.
    if let Some(logical) = current {
        result.push(logical);
    }
    result
}

/// Decodes escapes in `chars`; `col` is the 1-based column of `chars[0]`.
fn unescape(chars: &[char], line: usize, col: usize) -> Result<String> {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        i += 1;
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;
        match escaped {
            'u' => {
                let digits = chars
                    .get(i..i + 4)
                    .filter(|d| d.iter().all(char::is_ascii_hexdigit))
                    .ok_or_else(|| Error::syntax(line, col + i - 2, "malformed \\uxxxx encoding"))?;
                let unit = digits
                    .iter()
                    .fold(0u32, |acc, d| acc * 16 + d.to_digit(16).unwrap_or(0));
                i += 4;
                push_utf16_unit(&mut out, unit as u16, chars, &mut i);
            }
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{000C}'),
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Pushes a decoded UTF-16 unit, pairing a high surrogate with an immediately
/// following `\uXXXX` low surrogate. Unpaired surrogates become U+FFFD.
fn push_utf16_unit(out: &mut String, unit: u16, chars: &[char], i: &mut usize) {
    if (0xD800..0xDC00).contains(&unit) {
        if let Some(low) = low_surrogate_at(chars, *i) {
            let units = [unit, low];
            out.extend(char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)));
            *i += 6;
            return;
        }
    }
    out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
}

fn low_surrogate_at(chars: &[char], i: usize) -> Option<u16> {
    let escape = chars.get(i..i + 6)?;
    if escape[0] != '\\' || escape[1] != 'u' {
        return None;
    }
    let text: String = escape[2..].iter().collect();
    let unit = u16::from_str_radix(&text, 16).ok()?;
    (0xDC00..0xE000).contains(&unit).then_some(unit)
}

/// Parses `.properties` text into an ordered map. A repeated key keeps its
/// first position and its last value.
///
/// # Errors
///
/// Returns [`Error::Syntax`] for a `\u` escape not followed by four hex digits.
pub fn from_str(input: &str) -> Result<PropertiesMap> {
    let mut properties = PropertiesMap::new();
    for logical in logical_lines(input) {
        let chars = &logical.chars;

        let mut key_len = 0;
        let mut value_start = chars.len();
        let mut has_separator = false;
        let mut preceding_backslash = false;
        while key_len < chars.len() {
            let ch = chars[key_len];
            if (ch == '=' || ch == ':') && !preceding_backslash {
                value_start = key_len + 1;
                has_separator = true;
                break;
            } else if is_blank(ch) && !preceding_backslash {
                value_start = key_len + 1;
                break;
            }
            preceding_backslash = ch == '\\' && !preceding_backslash;
            key_len += 1;
        }
        while value_start < chars.len() {
            let ch = chars[value_start];
            if !is_blank(ch) {
                if !has_separator && (ch == '=' || ch == ':') {
                    has_separator = true;
                } else {
                    break;
                }
            }
            value_start += 1;
        }

        let key = unescape(&chars[..key_len], logical.line, 1)?;
        let value = unescape(&chars[value_start..], logical.line, value_start + 1)?;
        properties.insert(key, value);
    }
    Ok(properties)
}
