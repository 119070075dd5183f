//! Small file helpers shared by the persistence services.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::warn;

/// Reads a text file into a string.
///
/// Lines are joined with `\n` and the trailing newline is dropped, so the
/// result round-trips with [`write_text_file`]. A missing or unreadable
/// file reads as the empty string; content lookup treats absent files the
/// same as empty ones.
#[must_use]
pub fn read_text_file(path: &Path) -> String {
    if !path.exists() {
        return String::new();
    }
    match fs::read_to_string(path) {
        Ok(text) => text.lines().collect::<Vec<_>>().join("\n"),
        Err(e) => {
            warn!("Failed to read text file {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Writes a text string to a file, appending a trailing newline.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_text_file(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, format!("{text}\n"))
}

/// Copies `reader` into `writer`, reporting percentage progress.
///
/// The callback fires only when the integer percentage advances, so a
/// listener sees at most 101 calls no matter how large the stream is.
/// Passing a `total_len` of zero disables reporting.
///
/// # Errors
///
/// Returns the first I/O error from either side of the copy.
pub fn copy_with_progress(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    total_len: u64,
    mut progress: Option<&mut dyn FnMut(u32)>,
) -> io::Result<u64> {
    let mut buffer = [0u8; 4096];
    let mut copied: u64 = 0;
    let mut last_percent: Option<u32> = None;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
        copied += bytes_read as u64;

        if total_len > 0 {
            if let Some(callback) = progress.as_mut() {
                let percent = u32::try_from(copied * 100 / total_len).unwrap_or(u32::MAX);
                if last_percent != Some(percent) {
                    callback(percent);
                    last_percent = Some(percent);
                }
            }
        }
    }

    Ok(copied)
}
