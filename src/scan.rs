//! Discovery of input files under a base directory.
//!
//! Include patterns are Ant-style globs matched against `/`-separated paths
//! relative to the base directory:
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `**`    | zero or more whole path segments |
//! | `*`     | any characters within one segment |
//! | `?`     | exactly one character within a segment |
//! | `dir/`  | shorthand for `dir/**` |
//!
//! ```rust
//! use yml2props::IncludePatterns;
//!
//! let patterns = IncludePatterns::parse("included/**/*.yml, **/*.yaml").unwrap();
//! assert!(patterns.matches("included/foo/bar.yml"));
//! assert!(patterns.matches("included/bar.yml"));
//! assert!(patterns.matches("deep/er/app.yaml"));
//! assert!(!patterns.matches("excluded/foo/bar.yml"));
//! ```

use crate::{Error, Result};
use regex_lite::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Patterns used when none are configured.
pub const DEFAULT_INCLUDES: &str = "**/*.yml,**/*.yaml";

/// A compiled set of include patterns. A path is included if any matches.
#[derive(Clone, Debug)]
pub struct IncludePatterns {
    patterns: Vec<(String, Regex)>,
}

impl IncludePatterns {
    /// Parses a comma-separated list of patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the list is empty.
    pub fn parse(list: &str) -> Result<Self> {
        let patterns = list
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| Ok((p.to_string(), compile(p)?)))
            .collect::<Result<Vec<_>>>()?;
        if patterns.is_empty() {
            return Err(Error::invalid_pattern(list, "no include pattern given"));
        }
        Ok(IncludePatterns { patterns })
    }

    /// Returns `true` if `relative_path` (using `/` or `\` separators) is
    /// matched by any pattern.
    #[must_use]
    pub fn matches(&self, relative_path: &str) -> bool {
        let normalized = normalize(relative_path);
        self.patterns.iter().any(|(_, re)| re.is_match(&normalized))
    }

    /// The patterns as written, in order.
    pub fn as_strs(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(p, _)| p.as_str())
    }
}

impl Default for IncludePatterns {
    fn default() -> Self {
        // The built-in list is known to compile.
        IncludePatterns::parse(DEFAULT_INCLUDES).unwrap_or(IncludePatterns {
            patterns: Vec::new(),
        })
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Compiles one glob into an anchored regular expression.
fn compile(pattern: &str) -> Result<Regex> {
    let mut normalized = normalize(pattern);
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }

    let segments: Vec<&str> = normalized.split('/').collect();
    let mut regex = String::from("^");
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        if *segment == "**" {
            if i == last {
                // Trailing `**` also matches the directory itself.
                if regex.ends_with('/') {
                    regex.pop();
                    regex.push_str("(?:/.*)?");
                } else {
                    regex.push_str(".*");
                }
            } else {
                regex.push_str("(?:[^/]*/)*");
            }
            continue;
        }
        for ch in segment.chars() {
            match ch {
                '*' => regex.push_str("[^/]*"),
                '?' => regex.push_str("[^/]"),
                _ => {
                    let mut buf = [0u8; 4];
                    regex.push_str(&regex_lite::escape(ch.encode_utf8(&mut buf)));
                }
            }
        }
        if i != last {
            regex.push('/');
        }
    }
    regex.push('$');

    Regex::new(&regex).map_err(|e| Error::invalid_pattern(pattern, e))
}

/// Lists regular files under `base` matched by `patterns`, as sorted paths
/// relative to `base`. Symbolic links to directories are not followed.
///
/// # Errors
///
/// Returns [`Error::Io`] if `base` or one of its subdirectories cannot be read.
pub fn scan(base: &Path, patterns: &IncludePatterns) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(base, Path::new(""), patterns, &mut found)?;
    found.sort();
    debug!(
        base = %base.display(),
        matched = found.len(),
        "scanned input directory"
    );
    Ok(found)
}

fn walk(base: &Path, relative: &Path, patterns: &IncludePatterns, found: &mut Vec<PathBuf>) -> Result<()> {
    let dir = base.join(relative);
    let entries = fs::read_dir(&dir).map_err(|e| Error::io_at(&dir, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_at(&dir, &e))?;
        let file_type = entry.file_type().map_err(|e| Error::io_at(&entry.path(), &e))?;
        let child = relative.join(entry.file_name());
        if file_type.is_dir() {
            walk(base, &child, patterns, found)?;
        } else if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            let as_text = child.to_string_lossy();
            if patterns.matches(&as_text) {
                found.push(child);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "a: 1\n").unwrap();
    }

    #[test]
    fn test_double_star_matches_zero_or_more_directories() {
        let patterns = IncludePatterns::parse("**/*.yml").unwrap();
        assert!(patterns.matches("app.yml"));
        assert!(patterns.matches("a/b/c/app.yml"));
        assert!(!patterns.matches("app.yaml"));
        assert!(!patterns.matches("app.yml.bak"));
    }

    #[test]
    fn test_single_star_stays_within_segment() {
        let patterns = IncludePatterns::parse("config/*.yml").unwrap();
        assert!(patterns.matches("config/app.yml"));
        assert!(!patterns.matches("config/nested/app.yml"));
        assert!(!patterns.matches("app.yml"));
    }

    #[test]
    fn test_question_mark_and_literal_dots() {
        let patterns = IncludePatterns::parse("app-?.yml").unwrap();
        assert!(patterns.matches("app-1.yml"));
        assert!(!patterns.matches("app-12.yml"));
        assert!(!patterns.matches("app-1xyml"));
    }

    #[test]
    fn test_trailing_slash_means_everything_below() {
        let patterns = IncludePatterns::parse("conf/").unwrap();
        assert!(patterns.matches("conf/a.yml"));
        assert!(patterns.matches("conf/x/y/z.txt"));
        assert!(!patterns.matches("confx/a.yml"));
    }

    #[test]
    fn test_separators_are_normalized() {
        let patterns = IncludePatterns::parse("/included/**/*.yml").unwrap();
        assert!(patterns.matches("included\\foo\\bar.yml"));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(matches!(
            IncludePatterns::parse(" , "),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_default_patterns() {
        let patterns = IncludePatterns::default();
        assert_eq!(patterns.as_strs().collect::<Vec<_>>(), vec!["**/*.yml", "**/*.yaml"]);
    }

    #[test]
    fn test_scan_only_returns_included_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "included/foo/bar.yml");
        touch(temp.path(), "included/another/bar.yml");
        touch(temp.path(), "excluded/foo/bar.yml");
        touch(temp.path(), "included/notes.txt");

        let patterns = IncludePatterns::parse("included/**/*.yml").unwrap();
        let found = scan(temp.path(), &patterns).unwrap();
        assert_eq!(
            found,
            vec![
                PathBuf::from("included/another/bar.yml"),
                PathBuf::from("included/foo/bar.yml"),
            ]
        );
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = scan(&temp.path().join("missing"), &IncludePatterns::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
