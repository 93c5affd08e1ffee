//! GEF Reader Library
//!
//! A Rust library for reading geotechnical cone penetration test (CPT) files
//! exported as GEF text in two field dialects.
//!
//! This library provides tools for:
//! - Decoding files with a fixed encoding priority (Windows-1252, UTF-8, Windows-1250)
//! - Parsing `Key: value` headers with offset-aligned unit lines and decimal commas
//! - Parsing `#KEY=value` headers with COLUMNINFO column metadata
//! - Normalizing header keys and column names to one vocabulary
//! - Assembling a canonical [`CptRecord`] for exporters and analytics

pub mod acquisition;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod value;

// CLI modules
pub mod cli;

// Re-export commonly used types
pub use config::ParserConfig;
pub use error::{GefError, Result};
pub use models::{CptHeader, CptRecord, Dialect, MeasurementRow, Schema};
pub use parser::{
    GefParser, read_alt_gef_bytes, read_alt_gef_file, read_cpt_bytes, read_cpt_file,
    read_gef_bytes, read_gef_file,
};
pub use value::{TagValue, Value};
