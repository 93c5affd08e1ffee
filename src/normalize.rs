//! Header key and column name normalization.
//!
//! Maps the German colon-dialect header keys and the Dutch/English tag-dialect
//! column names onto one canonical vocabulary. Callers may pass overrides,
//! which are merged over the built-in table for a single call only.

use crate::models::OrderedMap;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in mapping from source names to canonical names
static DEFAULT_NAME_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Colon dialect header keys
        ("Projekt-Nummer", "projekt_id"),
        ("Projektname", "projekt_name"),
        ("Versuchs-Nummer", "aufschluss_name"),
        ("Kundenname", "kunde"),
        ("Ort", "ort"),
        ("Datum", "datum"),
        ("Konus-Nummer", "konus_nummer"),
        ("Geländekante", "ansatz_hoehe"),
        ("Wasserspiegel", "gw_stand"),
        ("Vorbohrwerte", "vorbohrwerte"),
        ("E Coordinate", "RW"),
        ("N Coordinate", "HW"),
        // Tag dialect column names (Dutch)
        ("Sondeerlengte", "depth"),
        ("Conusweerstand qc", "qc"),
        ("Wrijvingsweerstand fs", "fs"),
        ("Wrijvingsgetal Rf", "Rf"),
        ("Waterspanning u2", "u2"),
        ("Helling X", "inclination_x"),
        ("Helling Y", "inclination_y"),
        ("Gecorrigeerde diepte", "depth_corr"),
        ("Tijd", "time"),
        ("TESTID", "hole_id"),
        // Tag dialect column names (English)
        ("penetration length", "depth"),
        ("qc", "qc"),
        ("fs", "fs"),
        ("SampleTime", "time"),
        ("Rf", "Rf"),
    ])
});

/// Caller supplied source name to canonical name overrides
pub type NameOverrides = HashMap<String, String>;

/// A per-call merge of the built-in table and caller overrides
#[derive(Debug, Clone)]
pub struct NameNormalizer<'a> {
    overrides: Option<&'a NameOverrides>,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(overrides: Option<&'a NameOverrides>) -> Self {
        Self { overrides }
    }

    /// Canonical name for a source name; unmapped names pass through
    pub fn canonical<'n>(&'n self, name: &'n str) -> &'n str {
        if let Some(target) = self.overrides.and_then(|o| o.get(name)) {
            return target;
        }
        DEFAULT_NAME_MAP.get(name).copied().unwrap_or(name)
    }

    /// Rename every key of a header map.
    ///
    /// Two keys that map to the same canonical name collapse into one
    /// entry: the later value wins, at the position of the first.
    pub fn rename_keys<V: Clone>(&self, header: &OrderedMap<V>) -> OrderedMap<V> {
        let mut renamed = OrderedMap::new();
        for (key, value) in header.iter() {
            renamed.insert(self.canonical(key), value.clone());
        }
        renamed
    }

    /// Rename a list of column names, one output per input
    pub fn rename_columns<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        columns
            .iter()
            .map(|c| self.canonical(c.as_ref()).to_string())
            .collect()
    }
}

/// Rename header keys with the built-in table merged with `overrides`
pub fn map_to_default_header_names<V: Clone>(
    header: &OrderedMap<V>,
    overrides: Option<&NameOverrides>,
) -> OrderedMap<V> {
    NameNormalizer::new(overrides).rename_keys(header)
}

/// Rename column names with the built-in table merged with `overrides`
pub fn map_to_default_column_names<S: AsRef<str>>(
    columns: &[S],
    overrides: Option<&NameOverrides>,
) -> Vec<String> {
    NameNormalizer::new(overrides).rename_columns(columns)
}
