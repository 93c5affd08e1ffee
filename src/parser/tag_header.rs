//! Tag header dialect decoding
//!
//! Files in this dialect carry `#KEY=value` header lines. The repeated
//! `#COLUMNINFO` tag declares each data column, its unit and its name; the
//! whitespace separated data rows follow the header.

use crate::constants::{
    COLUMNINFO_KEY, COLUMNINFO_NAME_INDEX, COLUMNINFO_UNIT_INDEX, TAG_PREFIX, TAG_SEPARATOR,
};
use crate::error::{GefError, Result};
use crate::models::{Dialect, MeasurementRow, Schema, TagHeader};
use crate::normalize::{NameOverrides, map_to_default_column_names};
use crate::value::{TagValue, Value, coerce_row_token};
use serde::Serialize;
use tracing::debug;

/// Header, units and measurements of a tag dialect file
#[derive(Debug, Clone, Serialize)]
pub struct TagOutput {
    /// Every tag as found in the file, repeated tags as lists
    pub header: TagHeader,
    /// Units in COLUMNINFO order
    pub units: Vec<String>,
    /// Normalized column names in COLUMNINFO order
    pub columns: Schema,
    pub measurements: Vec<MeasurementRow>,
}

/// One COLUMNINFO entry
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub unit: String,
}

/// Decode a tag dialect file from its lines
pub fn decode_tag_lines<S: AsRef<str>>(
    lines: &[S],
    overrides: Option<&NameOverrides>,
    source_name: &str,
) -> Result<TagOutput> {
    let (header, header_lines) = extract_tag_header(lines);
    debug!(
        "{}: {} tags on {} header lines",
        source_name,
        header.len(),
        header_lines
    );

    let column_info = read_column_info(&header, source_name)?;
    let raw_names: Vec<&str> = column_info.iter().map(|c| c.name.as_str()).collect();
    let columns = Schema::new(map_to_default_column_names(&raw_names, overrides));
    let units = column_info.into_iter().map(|c| c.unit).collect();

    let measurements = read_tag_measurements(lines, &columns, header_lines, source_name)?;

    Ok(TagOutput {
        header,
        units,
        columns,
        measurements,
    })
}

/// Collect every `#` line into a tag header.
///
/// Returns the header and the number of tag lines, which is also the index
/// of the first data line.
pub fn extract_tag_header<S: AsRef<str>>(lines: &[S]) -> (TagHeader, usize) {
    let mut header = TagHeader::new();
    let mut header_lines = 0;

    for line in lines {
        let line: &str = line.as_ref();
        if !line.starts_with(TAG_PREFIX) {
            continue;
        }
        header_lines += 1;

        let tag = line.trim_start_matches(TAG_PREFIX);
        let (key, raw) = tag.split_once(TAG_SEPARATOR).unwrap_or((tag, ""));
        header.accumulate(key.trim(), TagValue::parse(raw.trim()));
    }

    (header, header_lines)
}

/// Column names and units from the COLUMNINFO tag, in declaration order
pub fn read_column_info(header: &TagHeader, source_name: &str) -> Result<Vec<ColumnInfo>> {
    let info = header
        .get(COLUMNINFO_KEY)
        .ok_or_else(|| GefError::missing_metadata(source_name, COLUMNINFO_KEY))?;

    info.occurrences()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let part = |index: usize| entry.part(index).and_then(Value::to_text);
            match (part(COLUMNINFO_NAME_INDEX), part(COLUMNINFO_UNIT_INDEX)) {
                (Some(name), Some(unit)) => Ok(ColumnInfo { name, unit }),
                _ => Err(GefError::missing_metadata(
                    source_name,
                    format!(
                        "{} entry {} has no unit and name",
                        COLUMNINFO_KEY,
                        i + 1
                    ),
                )),
            }
        })
        .collect()
}

/// Decode the rows after the header, skipping blank lines
pub fn read_tag_measurements<S: AsRef<str>>(
    lines: &[S],
    columns: &Schema,
    skip_lines: usize,
    source_name: &str,
) -> Result<Vec<MeasurementRow>> {
    let mut rows = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(skip_lines) {
        let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != columns.len() {
            return Err(GefError::row_shape(
                source_name,
                index + 1,
                columns.len(),
                tokens.len(),
            ));
        }

        let values = tokens
            .iter()
            .map(|token| coerce_row_token(token, Dialect::Tag))
            .collect();
        rows.push(MeasurementRow::new(columns.clone(), values));
    }

    Ok(rows)
}
