//! Table sources: file opening, gzip handling and comma-delimited row splitting.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Opens a table file, transparently decompressing `.gz` sources.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if path.is_dir() {
        return Err(InputError::InvalidInput(format!(
            "{} is a directory",
            path.display()
        )));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads every line of a table source. Trailing line terminators and a
/// leading UTF-8 byte order mark are removed. A line that is not valid UTF-8
/// is decoded lossily.
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>, InputError> {
    let mut buf = Vec::new();
    let mut lines = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        let line = match String::from_utf8_lossy(&buf) {
            std::borrow::Cow::Borrowed(text) => text.to_string(),
            std::borrow::Cow::Owned(text) => {
                warn!(line = lines.len() + 1, "line is not valid UTF-8; decoded lossily");
                text
            }
        };
        let line = line.trim_end_matches(['\n', '\r']);
        let line = if lines.is_empty() {
            line.strip_prefix('\u{feff}').unwrap_or(line)
        } else {
            line
        };
        lines.push(line.to_string());
    }
    Ok(lines)
}

/// Splits one row on commas. Fields are not trimmed here; callers decide
/// which columns matter.
pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// Human readable name of a source, used in load notifications.
pub fn source_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
