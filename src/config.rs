//! Configuration management and validation.
//!
//! Provides the parser configuration: which dialect to expect and which
//! project specific header names to map onto the canonical vocabulary.
//! Configuration is loaded from JSON, by default from the user config
//! directory, and CLI flags are applied on top.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{GefError, Result};
use crate::models::Dialect;
use crate::normalize::NameOverrides;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for decoding CPT files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Force a dialect instead of detecting it from the first line
    pub dialect: Option<Dialect>,

    /// Source name to canonical name overrides, e.g. {"X": "RW", "Z": "ansatz_hoehe"}
    pub header_mapping: NameOverrides,
}

impl ParserConfig {
    /// Force the given dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Replace the header mapping overrides
    pub fn with_header_mapping(mut self, mapping: NameOverrides) -> Self {
        self.header_mapping = mapping;
        self
    }

    /// Add overrides, replacing existing entries for the same source name
    pub fn merge_header_mapping(mut self, mapping: NameOverrides) -> Self {
        self.header_mapping.extend(mapping);
        self
    }

    /// Overrides to hand to the normalizer, `None` when there are none
    pub fn overrides(&self) -> Option<&NameOverrides> {
        if self.header_mapping.is_empty() {
            None
        } else {
            Some(&self.header_mapping)
        }
    }

    /// Reject mappings with empty source or target names
    pub fn validate(&self) -> Result<()> {
        for (source, target) in &self.header_mapping {
            if source.trim().is_empty() {
                return Err(GefError::configuration(format!(
                    "header mapping has an empty source name (target '{}')",
                    target
                )));
            }
            if target.trim().is_empty() {
                return Err(GefError::configuration(format!(
                    "header mapping for '{}' has an empty target name",
                    source
                )));
            }
        }
        Ok(())
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GefError::io(path, e))?;
        let config: ParserConfig = serde_json::from_str(&content).map_err(|e| GefError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_config_path().filter(|p| p.exists()) {
            Some(default_path) => Self::load(&default_path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Load a bare `{"source": "target"}` mapping file
pub fn load_header_mapping(path: &Path) -> Result<NameOverrides> {
    let content = std::fs::read_to_string(path).map_err(|e| GefError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| GefError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.dialect, None);
        assert!(config.overrides().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ParserConfig::default()
            .with_dialect(Dialect::Tag)
            .with_header_mapping(NameOverrides::from([("X".to_string(), "RW".to_string())]))
            .merge_header_mapping(NameOverrides::from([("Y".to_string(), "HW".to_string())]));

        assert_eq!(config.dialect, Some(Dialect::Tag));
        assert_eq!(config.overrides().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let config = ParserConfig::default()
            .with_header_mapping(NameOverrides::from([("X".to_string(), " ".to_string())]));
        assert!(matches!(
            config.validate(),
            Err(GefError::Configuration { .. })
        ));
    }

    #[test]
    fn test_load_from_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"dialect": "colon", "header_mapping": {{"Z": "ansatz_hoehe"}}}}"#
        )
        .unwrap();

        let config = ParserConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.dialect, Some(Dialect::Colon));
        assert_eq!(
            config.header_mapping.get("Z").map(String::as_str),
            Some("ansatz_hoehe")
        );
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"dialect": "tag"}}"#).unwrap();

        let config = ParserConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.dialect, Some(Dialect::Tag));
        assert!(config.header_mapping.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json").unwrap();

        assert!(matches!(
            ParserConfig::load(temp_file.path()),
            Err(GefError::Json { .. })
        ));
    }

    #[test]
    fn test_load_header_mapping() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"X": "RW", "Y": "HW"}}"#).unwrap();

        let mapping = load_header_mapping(temp_file.path()).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("Y").map(String::as_str), Some("HW"));
    }
}
