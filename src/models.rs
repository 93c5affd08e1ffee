//! Core data structures for decoded CPT files.
//!
//! Defines the dialect marker, ordered header maps, the shared row schema,
//! measurement rows and the canonical [`CptRecord`] handed to exporters.

use crate::constants::{COLUMNINFO_KEY, TAG_PREFIX};
use crate::value::{TagValue, Value};
use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// File dialects understood by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `Key: value` header followed by an offset-aligned whitespace table
    Colon,
    /// `#KEY=value` header with COLUMNINFO column metadata
    Tag,
}

impl Dialect {
    /// Detect the dialect from the first non-blank line.
    ///
    /// The `#` must sit in column 0, the same rule the tag decoder uses to
    /// count header lines.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Self {
        let first = lines.iter().find_map(|line| {
            let line: &str = line.as_ref();
            (!line.trim().is_empty()).then_some(line)
        });

        match first {
            Some(line) if line.starts_with(TAG_PREFIX) => Dialect::Tag,
            _ => Dialect::Colon,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Colon => "colon",
            Dialect::Tag => "tag",
        }
    }
}

/// Insertion-ordered string keyed map
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten key keeps its first position
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OrderedMap<TagValue> {
    /// Insert a tag, folding repeated keys into [`TagValue::Repeated`]
    pub fn accumulate(&mut self, key: impl Into<String>, value: TagValue) {
        let key = key.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                let entry = &mut self.entries[index].1;
                let previous = std::mem::replace(entry, TagValue::List(Vec::new()));
                *entry = previous.accumulate(value);
            }
            None => self.entries.push((key, value)),
        }
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Colon dialect header: key to float or text
pub type HeaderMap = OrderedMap<Value>;

/// Tag dialect header: key to scalar, parts list or repeated occurrences
pub type TagHeader = OrderedMap<TagValue>;

/// Column name to unit string, in column order
pub type UnitTable = OrderedMap<String>;

/// Ordered column names shared by every row of one file
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Arc<[String]>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: columns.into(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column; the last one wins when a name repeats
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().rposition(|c| c == name)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

/// One depth step of measurements, aligned to the file schema
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    schema: Schema,
    values: Vec<Value>,
}

impl MeasurementRow {
    /// Build a row; the caller guarantees one value per schema column
    pub(crate) fn new(schema: Schema, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.schema.index_of(column).map(|i| &self.values[i])
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for MeasurementRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Canonical CPT header fields with pass-through of everything else
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CptHeader {
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub hole_id: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub cone_number: Option<String>,
    pub water_level: Option<f64>,
    pub pre_excavation: Option<f64>,
    pub northing: Option<f64>,
    pub easting: Option<f64>,
    pub elevation: Option<f64>,
    /// Original keys with no canonical field
    pub extra: TagHeader,
}

impl CptHeader {
    /// Assemble from a normalized colon dialect header
    pub fn from_colon_header(header: &HeaderMap) -> Self {
        let mut cpt = CptHeader::default();

        for (key, value) in header.iter() {
            match key {
                "projekt_id" => cpt.project_id = value.to_text(),
                "projekt_name" => cpt.project_name = value.to_text(),
                "aufschluss_name" => cpt.hole_id = value.to_text(),
                "kunde" => cpt.client = value.to_text(),
                "ort" => cpt.location = value.to_text(),
                "datum" => cpt.date = value.to_text(),
                "konus_nummer" => cpt.cone_number = value.to_text(),
                "gw_stand" => cpt.water_level = value.as_f64(),
                "vorbohrwerte" => cpt.pre_excavation = value.as_f64(),
                "HW" => cpt.northing = value.as_f64(),
                "RW" => cpt.easting = value.as_f64(),
                "ansatz_hoehe" => cpt.elevation = value.as_f64(),
                _ => cpt.extra.insert(key, TagValue::Scalar(value.clone())),
            }
        }

        cpt
    }

    /// Assemble from a raw tag dialect header
    pub fn from_tag_header(header: &TagHeader) -> Self {
        let mut cpt = CptHeader::default();

        for (key, value) in header.iter() {
            match key {
                "TESTID" => cpt.hole_id = first_text(value),
                "PROJECTID" => {
                    cpt.project_id = match value {
                        TagValue::List(parts) => parts.last().and_then(Value::to_text),
                        other => first_text(other),
                    }
                }
                "XYID" => {
                    cpt.easting = value.part(1).and_then(Value::as_f64);
                    cpt.northing = value.part(2).and_then(Value::as_f64);
                }
                "ZID" => cpt.elevation = value.part(1).and_then(Value::as_f64),
                "STARTDATE" => cpt.date = iso_date_from_parts(value),
                COLUMNINFO_KEY => {}
                _ => cpt.extra.insert(key, value.clone()),
            }
        }

        cpt
    }

    /// Parse the date text as `dd.mm.yyyy` or ISO `yyyy-mm-dd`
    pub fn survey_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(date, "%d.%m.%Y")
            .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
            .ok()
    }

    /// Easting/northing pair, if both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.easting?, self.northing?))
    }
}

fn first_text(value: &TagValue) -> Option<String> {
    value.part(0).and_then(Value::to_text)
}

fn iso_date_from_parts(value: &TagValue) -> Option<String> {
    let part = |i: usize| match value.part(i) {
        Some(Value::Integer(n)) => Some(*n),
        _ => None,
    };
    let (year, month, day) = (part(0)?, part(1)?, part(2)?);
    let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// A decoded CPT file
#[derive(Debug, Clone, Serialize)]
pub struct CptRecord {
    dialect: Dialect,
    encoding: &'static str,
    header: CptHeader,
    units: UnitTable,
    schema: Schema,
    measurements: Vec<MeasurementRow>,
}

impl CptRecord {
    pub(crate) fn new(
        dialect: Dialect,
        encoding: &'static str,
        header: CptHeader,
        units: UnitTable,
        schema: Schema,
        measurements: Vec<MeasurementRow>,
    ) -> Self {
        Self {
            dialect,
            encoding,
            header,
            units,
            schema,
            measurements,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn encoding(&self) -> &'static str {
        self.encoding
    }

    pub fn header(&self) -> &CptHeader {
        &self.header
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn measurements(&self) -> &[MeasurementRow] {
        &self.measurements
    }

    /// Values of one column in depth order
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.schema.index_of(name)?;
        Some(self.measurements.iter().map(|row| &row.values()[index]).collect())
    }
}
