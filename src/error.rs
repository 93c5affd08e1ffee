//! Error handling for GEF parsing operations.
//!
//! Provides error types with context for text acquisition, schema
//! discovery and row decoding failures. Value coercion never fails,
//! so there is no variant for an unparseable token.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GefError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {source_name} with any of the encodings {tried:?}")]
    Decode {
        source_name: String,
        tried: Vec<&'static str>,
    },

    #[error("Missing metadata in {source_name}: {what}")]
    MissingMetadata { source_name: String, what: String },

    #[error(
        "Row shape mismatch in {source_name} at line {line}: expected {expected} values, found {found}"
    )]
    RowShape {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GefError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_metadata(source_name: impl Into<String>, what: impl Into<String>) -> Self {
        Self::MissingMetadata {
            source_name: source_name.into(),
            what: what.into(),
        }
    }

    pub fn row_shape(
        source_name: impl Into<String>,
        line: usize,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::RowShape {
            source_name: source_name.into(),
            line,
            expected,
            found,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GefError>;
