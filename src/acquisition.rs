//! Text acquisition for CPT files.
//!
//! Decodes raw bytes into lines by trying a fixed list of encodings in
//! priority order. Decoding is strict: both decoders depend on exact
//! characters and character offsets, so a replacement character is never
//! produced.

use crate::constants::{ENCODING_PRIORITY, WINDOWS_1250_UNDEFINED, WINDOWS_1252_UNDEFINED};
use crate::error::{GefError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1250, WINDOWS_1252};
use std::path::Path;
use tracing::{debug, warn};

/// Decoded lines of one file together with the encoding that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct RawLines {
    pub lines: Vec<String>,
    pub encoding: &'static str,
}

/// Read a file and decode it.
///
/// Files are split per line on `\r\n`, `\n` or a lone `\r`, so mixed line
/// endings within one file are tolerated.
pub fn read_text_file(path: &Path) -> Result<RawLines> {
    let bytes = std::fs::read(path).map_err(|e| GefError::io(path, e))?;
    decode_with(&bytes, &path.display().to_string(), split_universal_lines)
}

/// Decode an in-memory buffer, `source_name` is used in errors and logs
pub fn decode_bytes(bytes: &[u8], source_name: &str) -> Result<RawLines> {
    decode_with(bytes, source_name, split_lines)
}

fn decode_with(
    bytes: &[u8],
    source_name: &str,
    split: fn(&str) -> Vec<String>,
) -> Result<RawLines> {
    for &label in ENCODING_PRIORITY {
        match decode_strict(bytes, label) {
            Some(text) => {
                debug!("Decoded {} as {}", source_name, label);
                return Ok(RawLines {
                    lines: split(&text),
                    encoding: label,
                });
            }
            None => warn!(
                "Could not decode {} as {}, trying next encoding",
                source_name, label
            ),
        }
    }

    Err(GefError::Decode {
        source_name: source_name.to_string(),
        tried: ENCODING_PRIORITY.to_vec(),
    })
}

/// Split on CRLF when the text contains one, otherwise on LF
pub fn split_lines(text: &str) -> Vec<String> {
    let separator = if text.contains("\r\n") { "\r\n" } else { "\n" };
    text.split(separator).map(str::to_string).collect()
}

/// Split on `\r\n`, `\n` or a lone `\r`, deciding per line.
///
/// A trailing terminator does not produce an empty last line.
pub fn split_universal_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

fn decode_strict(bytes: &[u8], label: &str) -> Option<String> {
    let (encoding, undefined): (&'static Encoding, &[u8]) = match label {
        "windows-1252" => (WINDOWS_1252, WINDOWS_1252_UNDEFINED),
        "windows-1250" => (WINDOWS_1250, WINDOWS_1250_UNDEFINED),
        "utf-8" => (UTF_8, &[]),
        _ => return None,
    };

    if bytes.iter().any(|b| undefined.contains(b)) {
        return None;
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}
