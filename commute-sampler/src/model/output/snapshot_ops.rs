use std::{io::Write, path::Path};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::model::SamplerError;

/// overwrites `path` with the response body encoded as a JSON string. the body
/// is stored double-encoded (a quoted, escaped string), not as a JSON document,
/// and every character outside printable ASCII is written as a `\uXXXX` escape.
pub fn write_snapshot(path: &Path, body: &str) -> Result<(), SamplerError> {
    let mut encoded = Vec::with_capacity(body.len() + 2);
    let mut ser = serde_json::Serializer::with_formatter(&mut encoded, AsciiFormatter);
    body.serialize(&mut ser)?;
    std::fs::write(path, encoded).map_err(|e| SamplerError::io(path, e))?;
    log::debug!("wrote response snapshot to {path:?}");
    Ok(())
}

/// compact JSON output with non-ASCII characters escaped as UTF-16 code units.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// reads a snapshot written by [`write_snapshot`] back into the raw response body.
pub fn read_snapshot(path: &Path) -> Result<String, SamplerError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SamplerError::io(path, e))?;
    let body: String = serde_json::from_str(&contents)?;
    Ok(body)
}
