//! Command-line argument definitions for the GEF reader
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{ParserConfig, load_header_mapping};
use crate::models::Dialect;
use crate::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GEF reader
///
/// Reads cone penetration test files in the colon header and the
/// `#TAG=value` GEF dialects and prints their header, units and rows.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gef-reader",
    version,
    about = "Read geotechnical CPT files in colon header and #TAG=value GEF dialects",
    long_about = "Decodes cone penetration test survey files into a header, a unit table and \
                  depth indexed measurement rows. Handles decimal commas, offset aligned unit \
                  lines, repeated tags and missing value sentinels."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity (debug level)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one or more files and print a summary or JSON
    Parse(ParseArgs),
    /// Print the columns and units of a file
    Columns(ColumnsArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Files to parse; each file is handled independently
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub parser: ParserOptions,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

/// Arguments for the columns command
#[derive(Debug, Clone, Parser)]
pub struct ColumnsArgs {
    /// File to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub parser: ParserOptions,
}

/// Options shared by every command that parses files
#[derive(Debug, Clone, Parser)]
pub struct ParserOptions {
    /// Dialect of the input files
    #[arg(long = "dialect", value_enum, default_value_t = DialectArg::Auto)]
    pub dialect: DialectArg,

    /// JSON file with header name overrides, e.g. {"X": "RW"}
    #[arg(short = 'm', long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// JSON configuration file
    ///
    /// If not specified, looks for gef-reader/config.json in the user config directory
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

impl ParserOptions {
    /// Build the parser configuration: config file, then mapping file, then flags
    pub fn build_config(&self) -> Result<ParserConfig> {
        let mut config = ParserConfig::load_or_default(self.config_file.as_deref())?;

        if let Some(mapping_path) = &self.mapping {
            config = config.merge_header_mapping(load_header_mapping(mapping_path)?);
        }
        if let Some(dialect) = self.dialect.to_dialect() {
            config = config.with_dialect(dialect);
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    /// Detect from the first non-blank line
    Auto,
    /// `Key: value` header with whitespace table
    Colon,
    /// `#KEY=value` header with COLUMNINFO
    Tag,
}

impl DialectArg {
    pub fn to_dialect(self) -> Option<Dialect> {
        match self {
            DialectArg::Auto => None,
            DialectArg::Colon => Some(Dialect::Colon),
            DialectArg::Tag => Some(Dialect::Tag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary per file
    Summary,
    /// Full records as JSON
    Json,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
