//! Colon header dialect decoding
//!
//! Files in this dialect start with `Key: value` lines, followed by a line of
//! column names, a units line whose `[unit]` entries sit at the same character
//! offset as the column they annotate, and a whitespace separated table with
//! decimal commas.

use crate::constants::{DEFAULT_UNIT, HEADER_SCAN_DEPTH, HEADER_SEPARATOR, UNIT_MARKER};
use crate::error::{GefError, Result};
use crate::models::{Dialect, HeaderMap, MeasurementRow, Schema, UnitTable};
use crate::normalize::{NameOverrides, map_to_default_header_names};
use crate::value::{coerce_decimal_comma, coerce_row_token};
use serde::Serialize;
use tracing::debug;

/// Header, units and measurements of a colon dialect file
#[derive(Debug, Clone, Serialize)]
pub struct ColonOutput {
    /// Header with keys normalized to the canonical vocabulary
    pub header: HeaderMap,
    pub units: UnitTable,
    pub columns: Schema,
    pub measurements: Vec<MeasurementRow>,
}

/// Column names, units and rows of the measurement table
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    pub columns: Schema,
    pub units: UnitTable,
    pub rows: Vec<MeasurementRow>,
}

/// Decode a colon dialect file from its lines
pub fn decode_colon_lines<S: AsRef<str>>(
    lines: &[S],
    overrides: Option<&NameOverrides>,
    source_name: &str,
) -> Result<ColonOutput> {
    let header = extract_header_part(lines);
    let header = map_to_default_header_names(&header, overrides);
    debug!("{}: {} header entries", source_name, header.len());

    // Skips one line per header entry; blank lines above the header shift the table start
    let table = read_measurement_table(lines, header.len(), source_name)?;

    Ok(ColonOutput {
        header,
        units: table.units,
        columns: table.columns,
        measurements: table.rows,
    })
}

/// Collect `Key: value` pairs from the top of the file.
///
/// Lines are inspected until the line index exceeds [`HEADER_SCAN_DEPTH`];
/// any line containing a colon counts, later duplicates overwrite earlier
/// ones and empty keys are dropped.
pub fn extract_header_part<S: AsRef<str>>(lines: &[S]) -> HeaderMap {
    let mut header = HeaderMap::new();

    for (index, line) in lines.iter().enumerate() {
        if let Some((key, value)) = line.as_ref().split_once(HEADER_SEPARATOR) {
            let key = key.trim();
            if !key.is_empty() {
                header.insert(key, coerce_decimal_comma(value.trim()));
            }
        }
        if index > HEADER_SCAN_DEPTH {
            break;
        }
    }

    header
}

/// Read column names, units and rows after skipping `skip_lines` lines
pub fn read_measurement_table<S: AsRef<str>>(
    lines: &[S],
    skip_lines: usize,
    source_name: &str,
) -> Result<MeasurementTable> {
    let mut names: Option<(Vec<String>, Vec<(usize, usize)>)> = None;
    let mut aligned_units: Vec<Option<String>> = Vec::new();
    let mut units_seen = false;
    let mut raw_rows: Vec<(usize, Vec<&str>)> = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(skip_lines) {
        let line = line.as_ref();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let has_marker = line.contains(UNIT_MARKER);

        if names.is_none() && !has_marker {
            let spans = token_spans(line);
            debug!("{}: column line {:?}", source_name, tokens);
            aligned_units = vec![None; tokens.len()];
            names = Some((tokens.iter().map(|t| t.to_string()).collect(), spans));
        } else if has_marker && !units_seen {
            let (_, spans) = names.as_ref().ok_or_else(|| {
                GefError::missing_metadata(source_name, "column name line before units line")
            })?;
            align_units(line, spans, &mut aligned_units, source_name);
            units_seen = true;
        } else {
            raw_rows.push((index + 1, tokens));
        }
    }

    let (names, _) = names
        .ok_or_else(|| GefError::missing_metadata(source_name, "column name line"))?;

    let mut units = UnitTable::new();
    for (name, unit) in names.iter().zip(aligned_units) {
        units.insert(name.as_str(), unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()));
    }

    let columns = Schema::new(names);
    let rows = raw_rows
        .into_iter()
        .map(|(line_number, tokens)| decode_row(&columns, line_number, &tokens, source_name))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "{}: {} columns, {} rows",
        source_name,
        columns.len(),
        rows.len()
    );

    Ok(MeasurementTable {
        columns,
        units,
        rows,
    })
}

/// Character spans `(start, end)` of every whitespace separated token
fn token_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in line.chars().enumerate() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, line.chars().count()));
    }

    spans
}

/// Attach every `[unit]` to the column whose name starts at the same offset
fn align_units(
    units_line: &str,
    spans: &[(usize, usize)],
    aligned: &mut [Option<String>],
    source_name: &str,
) {
    let chars: Vec<char> = units_line.chars().collect();

    for (offset, _) in chars.iter().enumerate().filter(|(_, c)| **c == UNIT_MARKER) {
        let unit: String = chars[offset..].iter().take_while(|c| **c != ' ').collect();
        let unit = unit.trim().to_string();

        match spans.iter().position(|(start, _)| *start == offset) {
            Some(column) => aligned[column] = Some(unit),
            None => debug!(
                "{}: unit {} at offset {} is not aligned with a column",
                source_name, unit, offset
            ),
        }
    }
}

fn decode_row(
    columns: &Schema,
    line_number: usize,
    tokens: &[&str],
    source_name: &str,
) -> Result<MeasurementRow> {
    if tokens.len() != columns.len() {
        return Err(GefError::row_shape(
            source_name,
            line_number,
            columns.len(),
            tokens.len(),
        ));
    }

    let values = tokens
        .iter()
        .map(|token| coerce_row_token(token, Dialect::Colon))
        .collect();

    Ok(MeasurementRow::new(columns.clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_spans_use_character_offsets() {
        assert_eq!(token_spans("  Tiefe  qc"), vec![(2, 7), (9, 11)]);
        assert_eq!(token_spans("Gel\u{e4}nde x"), vec![(0, 7), (8, 9)]);
        assert_eq!(token_spans("   "), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn test_align_units_ignores_unaligned_markers() {
        let spans = token_spans("Tiefe     qc        fs");
        let mut aligned = vec![None; 3];
        // [m] at 6 and the first [MPa] at 11 sit between columns, the last one is under fs
        align_units("      [m]  [MPa]    [MPa]", &spans, &mut aligned, "test");

        assert_eq!(aligned, vec![None, None, Some("[MPa]".to_string())]);
    }

    #[test]
    fn test_header_scan_stops_after_depth() {
        let lines: Vec<String> = (0..60).map(|i| format!("key{i}: {i}")).collect();
        let header = extract_header_part(&lines);

        assert_eq!(header.len(), HEADER_SCAN_DEPTH + 2);
        assert!(header.contains_key("key51"));
        assert!(!header.contains_key("key52"));
    }

    #[test]
    fn test_header_drops_empty_keys_and_splits_once() {
        let lines = [": orphan", "Datum: 01.01.2022", "Zeit: 12:30"];
        let header = extract_header_part(&lines);

        assert_eq!(header.len(), 2);
        assert_eq!(header.get("Zeit").and_then(|v| v.as_str()), Some("12:30"));
    }
}
