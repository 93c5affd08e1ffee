//! CPT file parser for both GEF dialects
//!
//! This module ties text acquisition, dialect decoding and record assembly
//! together.
//!
//! ## Architecture
//!
//! - [`colon_header`] - `Key: value` header with an offset-aligned table
//! - [`tag_header`] - `#KEY=value` header with COLUMNINFO metadata
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gef_reader::config::ParserConfig;
//! use gef_reader::parser::GefParser;
//!
//! # fn example() -> gef_reader::error::Result<()> {
//! let parser = GefParser::new(ParserConfig::default());
//! let record = parser.parse_file(std::path::Path::new("CPT 01.GEF.txt"))?;
//!
//! println!("{} rows, columns {:?}", record.measurements().len(), record.schema().columns());
//! # Ok(())
//! # }
//! ```

pub mod colon_header;
pub mod tag_header;

#[cfg(test)]
mod tests;

pub use colon_header::{ColonOutput, decode_colon_lines};
pub use tag_header::{TagOutput, decode_tag_lines};

use crate::acquisition::{RawLines, decode_bytes, read_text_file};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::models::{CptHeader, CptRecord, Dialect, UnitTable};
use crate::normalize::NameOverrides;
use std::path::Path;
use tracing::info;

/// Read a colon dialect file into its header, units and measurements
pub fn read_gef_file(path: &Path, overrides: Option<&NameOverrides>) -> Result<ColonOutput> {
    let raw = read_text_file(path)?;
    decode_colon_lines(&raw.lines, overrides, &path.display().to_string())
}

/// Colon dialect decoding of an in-memory buffer
pub fn read_gef_bytes(bytes: &[u8], overrides: Option<&NameOverrides>) -> Result<ColonOutput> {
    let raw = decode_bytes(bytes, "<bytes>")?;
    decode_colon_lines(&raw.lines, overrides, "<bytes>")
}

/// Read a tag dialect file into its raw header, units and measurements
pub fn read_alt_gef_file(path: &Path, overrides: Option<&NameOverrides>) -> Result<TagOutput> {
    let raw = read_text_file(path)?;
    decode_tag_lines(&raw.lines, overrides, &path.display().to_string())
}

/// Tag dialect decoding of an in-memory buffer
pub fn read_alt_gef_bytes(bytes: &[u8], overrides: Option<&NameOverrides>) -> Result<TagOutput> {
    let raw = decode_bytes(bytes, "<bytes>")?;
    decode_tag_lines(&raw.lines, overrides, "<bytes>")
}

/// Parser producing canonical [`CptRecord`]s from either dialect
#[derive(Debug, Clone, Default)]
pub struct GefParser {
    config: ParserConfig,
}

impl GefParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a file from disk
    pub fn parse_file(&self, path: &Path) -> Result<CptRecord> {
        info!("Parsing CPT file: {}", path.display());
        let raw = read_text_file(path)?;
        self.parse_lines(raw, &path.display().to_string())
    }

    /// Parse an in-memory buffer, `source_name` labels logs and errors
    pub fn parse_bytes(&self, bytes: &[u8], source_name: &str) -> Result<CptRecord> {
        let raw = decode_bytes(bytes, source_name)?;
        self.parse_lines(raw, source_name)
    }

    /// Decode already acquired lines
    pub fn parse_lines(&self, raw: RawLines, source_name: &str) -> Result<CptRecord> {
        let dialect = self
            .config
            .dialect
            .unwrap_or_else(|| Dialect::detect(&raw.lines));
        let overrides = self.config.overrides();

        let record = match dialect {
            Dialect::Colon => {
                let output = decode_colon_lines(&raw.lines, overrides, source_name)?;
                CptRecord::new(
                    dialect,
                    raw.encoding,
                    CptHeader::from_colon_header(&output.header),
                    output.units,
                    output.columns,
                    output.measurements,
                )
            }
            Dialect::Tag => {
                let output = decode_tag_lines(&raw.lines, overrides, source_name)?;
                let mut units = UnitTable::new();
                for (column, unit) in output.columns.columns().iter().zip(&output.units) {
                    units.insert(column.as_str(), unit.clone());
                }
                CptRecord::new(
                    dialect,
                    raw.encoding,
                    CptHeader::from_tag_header(&output.header),
                    units,
                    output.columns,
                    output.measurements,
                )
            }
        };

        info!(
            "Parsed {} ({} dialect, {}): {} columns, {} rows",
            source_name,
            dialect.name(),
            raw.encoding,
            record.schema().len(),
            record.measurements().len()
        );

        Ok(record)
    }
}

/// Parse a file of either dialect with the given configuration
pub fn read_cpt_file(path: &Path, config: &ParserConfig) -> Result<CptRecord> {
    GefParser::new(config.clone()).parse_file(path)
}

/// Parse a buffer of either dialect with the given configuration
pub fn read_cpt_bytes(bytes: &[u8], source_name: &str, config: &ParserConfig) -> Result<CptRecord> {
    GefParser::new(config.clone()).parse_bytes(bytes, source_name)
}
