//! Application constants for the GEF reader
//!
//! Format markers, sentinels and fixed limits shared by both dialect
//! decoders.

// =============================================================================
// Text Acquisition
// =============================================================================

/// Encodings tried in order when decoding a file
pub const ENCODING_PRIORITY: &[&str] = &["windows-1252", "utf-8", "windows-1250"];

/// Bytes left undefined by the Windows-1252 code page
pub const WINDOWS_1252_UNDEFINED: &[u8] = &[0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Bytes left undefined by the Windows-1250 code page
pub const WINDOWS_1250_UNDEFINED: &[u8] = &[0x81, 0x83, 0x88, 0x90, 0x98];

// =============================================================================
// Colon Header Dialect
// =============================================================================

/// Separator between key and value in a colon header line
pub const HEADER_SEPARATOR: char = ':';

/// Header lines are scanned until the line index exceeds this value.
///
/// Headers with more colon lines than this are cut off.
pub const HEADER_SCAN_DEPTH: usize = 50;

/// Marker that identifies the units line below the column names
pub const UNIT_MARKER: char = '[';

/// Unit assigned to columns without an aligned unit
pub const DEFAULT_UNIT: &str = "[-]";

// =============================================================================
// Tag Header Dialect
// =============================================================================

/// Prefix of every tag line
pub const TAG_PREFIX: char = '#';

/// Separator between tag key and raw value
pub const TAG_SEPARATOR: char = '=';

/// Separator between the parts of a tag value
pub const TAG_PART_SEPARATOR: char = ',';

/// Tag that declares one data column per occurrence
pub const COLUMNINFO_KEY: &str = "COLUMNINFO";

/// Position of the unit inside a COLUMNINFO entry
pub const COLUMNINFO_UNIT_INDEX: usize = 1;

/// Position of the column name inside a COLUMNINFO entry
pub const COLUMNINFO_NAME_INDEX: usize = 2;

// =============================================================================
// Missing Values
// =============================================================================

/// Missing value token used by both dialects
pub const UNDEF_SENTINEL: &str = "UNDEF";

/// Numeric missing value token used in tag dialect data rows
pub const VOID_SENTINEL: &str = "-99999.000";

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "gef-reader";

/// Config file name inside the config dir
pub const CONFIG_FILE_NAME: &str = "config.json";
