//! Command-line interface definition.
//!
//! Every option can also be set through a `YML2PROPS_*` environment variable.

use crate::scan::DEFAULT_INCLUDES;
use crate::{
    Charset, ConvertOptions, FlattenOptions, IncludePatterns, KeyOrder, PropertiesOptions,
    Result, Timestamp,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Convert YAML files into .properties files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for input files
    #[arg(default_value = ".", env = "YML2PROPS_INPUT_DIRECTORY")]
    pub input_directory: PathBuf,

    /// Comma-separated include patterns, relative to the input directory
    #[arg(short, long, default_value = DEFAULT_INCLUDES, env = "YML2PROPS_INCLUDES")]
    pub includes: String,

    /// Charset used to read input files
    #[arg(long, default_value = "UTF-8", env = "YML2PROPS_INPUT_CHARSET")]
    pub input_charset: String,

    /// Charset used to write output files
    #[arg(long, default_value = "UTF-8", env = "YML2PROPS_OUTPUT_CHARSET")]
    pub output_charset: String,

    /// Delete each input file after it was converted successfully
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        env = "YML2PROPS_DELETE_ORIGINAL"
    )]
    pub delete_original: bool,

    /// Extension of the output files
    #[arg(long, default_value = crate::convert::DEFAULT_OUTPUT_EXTENSION, env = "YML2PROPS_OUTPUT_EXTENSION")]
    pub output_extension: String,

    /// Text written for null values
    #[arg(long, default_value = "null", env = "YML2PROPS_NULL_VALUE")]
    pub null_value: String,

    /// Write keys in lexicographic order instead of document order
    #[arg(long, env = "YML2PROPS_SORTED")]
    pub sorted: bool,

    /// Write a date comment line at the top of each file
    #[arg(long, env = "YML2PROPS_TIMESTAMP")]
    pub timestamp: bool,

    /// Comment written at the top of each file
    #[arg(long, env = "YML2PROPS_COMMENT")]
    pub comment: Option<String>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Builds the batch configuration from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown charset names or an empty include list.
    pub fn to_options(&self) -> Result<ConvertOptions> {
        let mut output = PropertiesOptions::new()
            .with_charset(self.output_charset.parse::<Charset>()?)
            .with_key_order(if self.sorted {
                KeyOrder::Sorted
            } else {
                KeyOrder::Document
            });
        if self.timestamp {
            output = output.with_timestamp(Timestamp::Now);
        }
        if let Some(comment) = &self.comment {
            output = output.with_comment(comment.clone());
        }

        Ok(ConvertOptions::new(&self.input_directory)
            .with_includes(IncludePatterns::parse(&self.includes)?)
            .with_input_charset(self.input_charset.parse()?)
            .with_flatten_options(FlattenOptions::new().with_null_value(self.null_value.clone()))
            .with_output_options(output)
            .with_delete_original(self.delete_original)
            .with_output_extension(self.output_extension.clone()))
    }

    /// Default log level, overridden by `RUST_LOG`.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
