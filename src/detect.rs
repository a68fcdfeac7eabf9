//! Text input detection and loading.
//!
//! Filing bodies, exhibit captions and cover sheets are plain UTF-8 files.
//! Anything else (binary data, other encodings) is rejected up front so the
//! layout engine only ever sees text.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Line ending convention found in a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Both conventions occur
    Mixed,
    /// Single line, no terminator
    None,
}

/// Information about a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    /// Whether the data starts with a UTF-8 BOM
    pub has_bom: bool,
    /// Line ending convention
    pub line_ending: LineEnding,
}

impl std::fmt::Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ending = match self.line_ending {
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
            LineEnding::Mixed => "mixed",
            LineEnding::None => "none",
        };
        write!(
            f,
            "UTF-8{} text, {} line endings",
            if self.has_bom { " (BOM)" } else { "" },
            ending
        )
    }
}

/// Detect the text format of raw bytes.
///
/// # Returns
/// * `Ok(TextFormat)` if the data is UTF-8 text
/// * `Err(Error::NotText)` if the data contains NUL bytes or invalid UTF-8
pub fn detect_text_from_bytes(data: &[u8]) -> Result<TextFormat> {
    let has_bom = data.starts_with(UTF8_BOM);
    let body = if has_bom { &data[UTF8_BOM.len()..] } else { data };

    if let Some(pos) = body.iter().position(|&b| b == 0) {
        return Err(Error::NotText(format!("NUL byte at offset {}", pos)));
    }

    let text = std::str::from_utf8(body)
        .map_err(|e| Error::NotText(format!("invalid UTF-8: {}", e)))?;

    Ok(TextFormat {
        has_bom,
        line_ending: line_ending_of(text),
    })
}

fn line_ending_of(text: &str) -> LineEnding {
    let crlf = text.matches("\r\n").count();
    let lf = text.matches('\n').count();

    match (crlf, lf) {
        (0, 0) => LineEnding::None,
        (0, _) => LineEnding::Lf,
        (c, l) if c == l => LineEnding::CrLf,
        _ => LineEnding::Mixed,
    }
}

/// Decode bytes into a `String`, dropping a leading BOM.
pub fn decode_text(data: &[u8]) -> Result<String> {
    let format = detect_text_from_bytes(data)?;
    let body = if format.has_bom {
        &data[UTF8_BOM.len()..]
    } else {
        data
    };
    String::from_utf8(body.to_vec()).map_err(|e| Error::NotText(format!("invalid UTF-8: {}", e)))
}

/// Read a UTF-8 text file.
///
/// Missing or unreadable files yield `Error::InputFile` naming the path.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    decode_text(&data)
}

/// Check if bytes are acceptable text input.
pub fn is_text_bytes(data: &[u8]) -> bool {
    detect_text_from_bytes(data).is_ok()
}
