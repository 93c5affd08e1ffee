//! Tests for dialect detection and record assembly

use super::*;
use crate::config::ParserConfig;
use crate::error::GefError;
use crate::models::Dialect;
use crate::normalize::NameOverrides;
use crate::parser::{GefParser, read_alt_gef_bytes, read_gef_bytes};
use crate::value::Value;
use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_parse_colon_bytes() {
    let parser = GefParser::default();
    let record = parser
        .parse_bytes(&windows_1252(&create_colon_gef()), "CPT 01.GEF.txt")
        .unwrap();

    assert_eq!(record.dialect(), Dialect::Colon);
    assert_eq!(record.encoding(), "windows-1252");
    assert_eq!(record.measurements().len(), 4);

    let header = record.header();
    assert_eq!(header.project_id.as_deref(), Some("12345678-10001"));
    assert_eq!(header.hole_id.as_deref(), Some("CPT 01"));
    assert_eq!(header.client.as_deref(), Some(""));
    assert_eq!(header.elevation, Some(-100.0));
    assert_eq!(header.water_level, Some(0.0));
    assert_eq!(header.survey_date(), NaiveDate::from_ymd_opt(2022, 1, 1));
    assert!(header.extra.is_empty());

    assert_eq!(
        record.units().get("I").map(String::as_str),
        Some("[°]")
    );
}

#[test]
fn test_parse_tag_bytes() {
    let parser = GefParser::default();
    let record = parser
        .parse_bytes(create_tag_gef().as_bytes(), "CPT-01.gef")
        .unwrap();

    assert_eq!(record.dialect(), Dialect::Tag);
    assert_eq!(record.measurements().len(), 3);

    let header = record.header();
    assert_eq!(header.hole_id.as_deref(), Some("CPT-01"));
    assert_eq!(header.project_id.as_deref(), Some("146203"));
    assert_eq!(header.coordinates(), Some((132127.181, 458102.351)));
    assert_eq!(header.elevation, Some(1.881));
    assert_eq!(header.survey_date(), NaiveDate::from_ymd_opt(2022, 3, 24));
    assert!(header.extra.contains_key("COLUMNVOID"));

    let unit_keys: Vec<_> = record.units().keys().collect();
    assert_eq!(unit_keys, vec!["depth", "qc", "fs", "Rf", "u2"]);
    assert_eq!(record.units().get("Rf").map(String::as_str), Some("%"));
}

#[test]
fn test_column_access() {
    let record = GefParser::default()
        .parse_bytes(create_tag_gef().as_bytes(), "CPT-01.gef")
        .unwrap();

    let depth = record.column("depth").unwrap();
    assert_eq!(
        depth,
        vec![&Value::Float(0.0), &Value::Float(0.02), &Value::Integer(1)]
    );
    assert!(record.column("missing").is_none());
}

#[test]
fn test_forced_dialect_overrides_detection() {
    let config = ParserConfig::default().with_dialect(Dialect::Tag);
    let parser = GefParser::new(config);

    let result = parser.parse_bytes(&windows_1252(&create_colon_gef()), "colon.txt");
    assert!(matches!(result, Err(GefError::MissingMetadata { .. })));
}

#[test]
fn test_config_mapping_applies_to_header() {
    let config = ParserConfig::default().with_header_mapping(NameOverrides::from([(
        "Versuchs-Nummer".to_string(),
        "test_name".to_string(),
    )]));

    let record = GefParser::new(config)
        .parse_bytes(&windows_1252(&create_colon_gef()), "colon.txt")
        .unwrap();

    assert_eq!(record.header().hole_id, None);
    assert_eq!(
        record.header().extra.get("test_name"),
        Some(&crate::value::TagValue::Scalar(Value::Text(
            "CPT 01".to_string()
        )))
    );
}

#[test]
fn test_parse_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(&windows_1252(&create_colon_gef()))
        .unwrap();

    let record = GefParser::default().parse_file(temp_file.path()).unwrap();
    assert_eq!(record.measurements().len(), 4);
    assert_eq!(record.schema().columns().len(), 13);
}

#[test]
fn test_triple_functions() {
    let colon = read_gef_bytes(&windows_1252(&create_colon_gef()), None).unwrap();
    assert_eq!(colon.header.get("ansatz_hoehe"), Some(&Value::Float(-100.0)));
    assert_eq!(colon.units.get("qc").map(String::as_str), Some("[MPa]"));

    let tag = read_alt_gef_bytes(create_tag_gef().as_bytes(), None).unwrap();
    assert_eq!(tag.units.len(), 5);
    assert!(tag.header.contains_key("COLUMNINFO"));
}

#[test]
fn test_record_serializes_to_json() {
    let record = GefParser::default()
        .parse_bytes(create_tag_gef().as_bytes(), "CPT-01.gef")
        .unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["dialect"], "tag");
    assert_eq!(json["schema"][0], "depth");
    assert_eq!(json["measurements"][0]["fs"], serde_json::Value::Null);
    assert_eq!(json["measurements"][2]["depth"], 1);
    assert_eq!(json["header"]["extra"]["COLUMNVOID"][1][0], 2);
}

#[test]
fn test_undecodable_bytes() {
    let result = GefParser::default().parse_bytes(b"\x81\xff", "broken.gef");
    assert!(matches!(result, Err(GefError::Decode { .. })));
}
