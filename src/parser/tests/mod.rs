//! Test fixtures for the CPT parser
//!
//! Builds sample files of both dialects. The colon dialect fixture lays its
//! column names and units out on a 10 character grid, the way field
//! instruments export them, so the unit offsets line up with the names.

mod parser_tests;

pub const COLON_HEADER_LINES: [&str; 12] = [
    "Projekt-Nummer: 12345678-10001",
    "    Projektname: Testsite",
    "    Versuchs-Nummer: CPT 01",
    "    Kundenname: ",
    "    Ort: Testsite",
    "    Datum: 01.01.2022",
    "    Konus-Nummer: S15CFIIP.S99999",
    "    Geländekante: -100,0",
    "    Wasserspiegel: 0,00",
    "    Vorbohrwerte: 0,00",
    "    N Coordinate: 0,000",
    "    E Coordinate: 0,000",
];

pub const COLON_COLUMNS: [&str; 13] = [
    "Tiefe", "qc", "fs", "u2", "I", "Rf", "ic", "Su_min", "Su_max", "soilfr", "soilbq", "soilavg",
    "IFA",
];

pub const COLON_UNITS: [&str; 13] = [
    "", "[MPa]", "[MPa]", "[MPa]", "[°]", "[%]", "", "[kPa]", "[kPa]", "", "", "", "[°]",
];

pub const COLON_ROWS: [[&str; 13]; 4] = [
    [
        "0,00", "0,01", "0,000", "0,000", "1,6", "0,02", "2,70", "0,271", "0,452", "4,0", "5,0",
        "4,0", "UNDEF",
    ],
    [
        "0,01", "0,66", "0,006", "0,013", "1,8", "0,60", "1,17", "UNDEF", "UNDEF", "0,0", "0,0",
        "0,0", "UNDEF",
    ],
    [
        "0,02", "1,30", "0,006", "0,029", "1,6", "0,50", "0,85", "UNDEF", "UNDEF", "0,0", "0,0",
        "0,0", "UNDEF",
    ],
    [
        "0,16", "1,79", "0,008", "0,037", "1,5", "0,43", "1,00", "UNDEF", "UNDEF", "7,0", "7,0",
        "7,0", "50,090",
    ],
];

/// Lay cells out on the 10 character grid behind a 4 space indent
pub fn aligned_line(cells: &[&str]) -> String {
    let body: String = cells.iter().map(|c| format!("{:<10}", c)).collect();
    format!("    {}", body)
}

/// Lines of a complete colon dialect file
pub fn colon_gef_lines() -> Vec<String> {
    let mut lines: Vec<String> = COLON_HEADER_LINES.iter().map(|l| l.to_string()).collect();
    lines.push("    ".to_string());
    lines.push(aligned_line(&COLON_COLUMNS));
    lines.push(aligned_line(&COLON_UNITS));
    lines.push("    ".to_string());
    lines.extend(COLON_ROWS.iter().map(|row| aligned_line(row)));
    lines.push(String::new());
    lines
}

pub fn create_colon_gef() -> String {
    colon_gef_lines().join("\n")
}

/// Complete tag dialect file
pub fn create_tag_gef() -> String {
    r#"#GEFID= 1, 1, 0
#FILEOWNER= Wagen 2
#COMPANYID= Fugro GeoServices B.V., NL005621409B08, 31
#PROJECTID= CPT, 146203
#TESTID= CPT-01
#XYID= 31000, 132127.181, 458102.351, 0.000, 0.000
#ZID= 31000, 1.881, 0.000
#STARTDATE= 2022, 03, 24
#COLUMN= 5
#COLUMNINFO= 1, m, Sondeerlengte, 1
#COLUMNINFO= 2, MPa, Conusweerstand qc, 2
#COLUMNINFO= 3, MPa, Wrijvingsweerstand fs, 3
#COLUMNINFO= 4, %, Wrijvingsgetal Rf, 4
#COLUMNINFO= 5, MPa, Waterspanning u2, 6
#COLUMNVOID= 1, -99999.000
#COLUMNVOID= 2, -99999.000
#EOH=
0.000 0.121 -99999.000 -99999.000 0.002
0.020 0.559 0.0042 0.75 0.004
1 2.5 0.013 0.52 UNDEF
"#
    .replace('\n', "\r\n")
}

/// Encode test text the way field instruments write it
pub fn windows_1252(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!unmappable, "fixture text must be representable in Windows-1252");
    bytes.into_owned()
}
