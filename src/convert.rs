//! Batch conversion of YAML files into property files.
//!
//! A [`Converter`] enumerates the files matched by its include patterns and
//! converts each one next to its source: `conf/app.yml` becomes
//! `conf/app.properties`. A file that fails is reported and skipped; the rest
//! of the batch still runs. Sources are only deleted once their output has
//! been written in full.
//!
//! ```rust,no_run
//! use yml2props::{Charset, ConvertOptions, Converter, IncludePatterns};
//!
//! let options = ConvertOptions::new("target/classes")
//!     .with_includes(IncludePatterns::parse("**/*.yml").unwrap())
//!     .with_input_charset(Charset::Iso8859_1)
//!     .with_delete_original(false);
//!
//! let report = Converter::new(options).run().unwrap();
//! println!("{} converted, {} failed", report.converted.len(), report.failed.len());
//! report.into_result().unwrap();
//! ```

use crate::{
    flatten_with, from_yaml_str, Charset, Error, FlattenOptions, IncludePatterns,
    PropertiesOptions, Result, Serializer,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension given to output files unless configured otherwise.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "properties";

/// Configuration for one conversion batch.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Root of the tree to search; include patterns are relative to it.
    pub input_directory: PathBuf,
    pub includes: IncludePatterns,
    pub input_charset: Charset,
    pub flatten: FlattenOptions,
    /// Output charset, header and key order.
    pub output: PropertiesOptions,
    /// Remove each source file after its output was written.
    pub delete_original: bool,
    pub output_extension: String,
}

impl ConvertOptions {
    /// Options with the defaults: all `.yml`/`.yaml` files, UTF-8 in and
    /// out, sources deleted after conversion.
    pub fn new(input_directory: impl Into<PathBuf>) -> Self {
        ConvertOptions {
            input_directory: input_directory.into(),
            includes: IncludePatterns::default(),
            input_charset: Charset::default(),
            flatten: FlattenOptions::default(),
            output: PropertiesOptions::default(),
            delete_original: true,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_includes(mut self, includes: IncludePatterns) -> Self {
        self.includes = includes;
        self
    }

    #[must_use]
    pub fn with_input_charset(mut self, charset: Charset) -> Self {
        self.input_charset = charset;
        self
    }

    #[must_use]
    pub fn with_output_charset(mut self, charset: Charset) -> Self {
        self.output.charset = charset;
        self
    }

    #[must_use]
    pub fn with_flatten_options(mut self, flatten: FlattenOptions) -> Self {
        self.flatten = flatten;
        self
    }

    #[must_use]
    pub fn with_output_options(mut self, output: PropertiesOptions) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_delete_original(mut self, delete_original: bool) -> Self {
        self.delete_original = delete_original;
        self
    }

    #[must_use]
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }
}

/// A successfully converted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Converted {
    pub source: PathBuf,
    pub target: PathBuf,
    pub entries: usize,
    /// Whether the source file was removed.
    pub deleted: bool,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: Vec<Converted>,
    /// Each failure is an [`Error::Conversion`] naming the file.
    pub failed: Vec<Error>,
}

impl ConversionReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turns a report with failures into [`Error::BatchFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::BatchFailed`] if any file failed to convert.
    pub fn into_result(self) -> Result<Vec<Converted>> {
        if self.is_success() {
            Ok(self.converted)
        } else {
            Err(Error::BatchFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Runs conversion batches with a fixed configuration.
#[derive(Clone, Debug)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    /// Converts every matched file.
    ///
    /// Files whose outputs would collide, such as `app.yml` and `app.yaml`,
    /// fail with [`Error::TargetConflict`] and are kept.
    ///
    /// # Errors
    ///
    /// Fails only if the input directory cannot be scanned. Per-file failures
    /// are collected in the returned report.
    pub fn run(&self) -> Result<ConversionReport> {
        let base = &self.options.input_directory;
        let files = crate::scan(base, &self.options.includes)?;
        info!(
            directory = %base.display(),
            files = files.len(),
            "converting YAML files"
        );

        let mut claims: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        for relative in &files {
            claims
                .entry(self.target_path(relative))
                .or_default()
                .push(relative.clone());
        }

        let mut report = ConversionReport::default();
        for relative in files {
            let target = self.target_path(&relative);
            let result = match claims.get(&target) {
                // Inputs sharing an output are all left untouched.
                Some(sources) if sources.len() > 1 => Err(Error::TargetConflict {
                    target,
                    sources: sources.clone(),
                }),
                _ => self.convert_file(&base.join(&relative)),
            };
            match result {
                Ok(converted) => {
                    info!(
                        source = %relative.display(),
                        entries = converted.entries,
                        "converted"
                    );
                    report.converted.push(converted);
                }
                Err(err) => {
                    warn!(source = %relative.display(), error = %err, "conversion failed");
                    report.failed.push(Error::conversion(relative, err));
                }
            }
        }

        if report.is_success() {
            info!(converted = report.converted.len(), "conversion finished");
        } else {
            warn!(
                converted = report.converted.len(),
                failed = report.failed.len(),
                "conversion finished with failures"
            );
        }
        Ok(report)
    }

    /// Converts a single file next to itself, then removes it if configured.
    ///
    /// # Errors
    ///
    /// Returns the first read, decode, parse, write or delete error. The source
    /// is never removed unless the output was written.
    pub fn convert_file(&self, source: &Path) -> Result<Converted> {
        let target = self.target_path(source);
        if target == source {
            return Err(Error::SameFile(source.to_path_buf()));
        }

        let bytes = fs::read(source).map_err(|e| Error::io_at(source, &e))?;
        let text = self.options.input_charset.decode(&bytes);
        let tree = from_yaml_str(&text)?;
        let properties = flatten_with(&tree, &self.options.flatten);

        let mut serializer = Serializer::new(self.options.output.clone());
        serializer.write_header();
        serializer.write_properties(&properties);
        let encoded = self.options.output.charset.encode(&serializer.into_inner());
        fs::write(&target, encoded).map_err(|e| Error::io_at(&target, &e))?;
        debug!(target = %target.display(), "wrote properties file");

        if self.options.delete_original {
            fs::remove_file(source).map_err(|e| Error::io_at(source, &e))?;
        }
        Ok(Converted {
            source: source.to_path_buf(),
            target,
            entries: properties.len(),
            deleted: self.options.delete_original,
        })
    }

    /// `dir/name.yml` maps to `dir/name.<output_extension>`.
    fn target_path(&self, source: &Path) -> PathBuf {
        source.with_extension(&self.options.output_extension)
    }
}
