use std::{fmt, fs, io::Cursor, path::Path};

use log::{debug, trace};
use plist::Value;

use crate::error::PlistError;

const BINARY_MAGIC: &[u8] = b"bplist";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// On-disk encodings of a plist tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Binary,
    Json,
    /// The old NeXTSTEP text format. Read only.
    OpenStep,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Xml => "XML",
            Format::Binary => "binary",
            Format::Json => "JSON",
            Format::OpenStep => "OpenStep",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Pretty-print JSON output. XML output is always indented.
    pub indent: bool,
}

/// Guesses the encoding of `data` from its first bytes.
///
/// Returns `None` for empty or whitespace-only input.
pub fn detect_format(data: &[u8]) -> Option<Format> {
    if data.starts_with(BINARY_MAGIC) {
        return Some(Format::Binary);
    }
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data.iter().position(|b| !b.is_ascii_whitespace())?;
    let text = &data[start..];
    let format = match text[0] {
        b'<' => Format::Xml,
        b'{' | b'[' | b'"' | b'-' | b'0'..=b'9' => Format::Json,
        _ if [&b"true"[..], b"false", b"null"]
            .iter()
            .any(|word| text.starts_with(word)) =>
        {
            Format::Json
        }
        _ => Format::OpenStep,
    };
    Some(format)
}

/// Heuristic used by callers that only care whether data is text: anything
/// outside ASCII is treated as binary.
pub fn is_binary(data: &[u8]) -> bool {
    !data.is_ascii()
}

fn parse_as(data: &[u8], format: Format) -> Option<Value> {
    let parsed = match format {
        Format::Xml => Value::from_reader_xml(data).map_err(|e| e.to_string()),
        Format::Binary | Format::OpenStep => {
            Value::from_reader(Cursor::new(data)).map_err(|e| e.to_string())
        }
        Format::Json => serde_json::from_slice::<Value>(data).map_err(|e| e.to_string()),
    };
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("{format} parse failed: {e}");
            None
        }
    }
}

/// Parses `data` in whatever format it is in and reports the format found.
///
/// JSON-looking input that fails to parse as JSON is retried with the generic
/// plist reader, and OpenStep-looking input is retried as JSON.
pub fn read_from_bytes(data: &[u8]) -> Result<(Value, Format), PlistError> {
    let format = detect_format(data).ok_or(PlistError::Parse { format: None })?;
    debug!("detected {format} plist ({} bytes)", data.len());

    if let Some(value) = parse_as(data, format) {
        return Ok((value, format));
    }
    let fallback = match format {
        Format::Json => Some(Format::OpenStep),
        Format::OpenStep => Some(Format::Json),
        Format::Xml | Format::Binary => None,
    };
    fallback
        .and_then(|other| parse_as(data, other).map(|value| (value, other)))
        .ok_or(PlistError::Parse {
            format: Some(format),
        })
}

pub fn read_from_file(path: impl AsRef<Path>) -> Result<(Value, Format), PlistError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!("read {} bytes from {}", data.len(), path.display());
    read_from_bytes(&data)
}

pub fn write_to_vec(
    value: &Value,
    format: Format,
    options: WriteOptions,
) -> Result<Vec<u8>, PlistError> {
    let mut buf = Vec::new();
    match format {
        Format::Xml => value.to_writer_xml(&mut buf)?,
        Format::Binary => value.to_writer_binary(&mut buf)?,
        Format::Json if options.indent => serde_json::to_writer_pretty(&mut buf, value)?,
        Format::Json => serde_json::to_writer(&mut buf, value)?,
        Format::OpenStep => {
            return Err(PlistError::invalid_arg(
                "writing OpenStep plists is not supported",
            ))
        }
    }
    Ok(buf)
}

pub fn write_to_file(
    value: &Value,
    path: impl AsRef<Path>,
    format: Format,
    options: WriteOptions,
) -> Result<(), PlistError> {
    let buf = write_to_vec(value, format, options)?;
    fs::write(path, buf)?;
    Ok(())
}
