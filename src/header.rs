//! Metadata store
//!
//! Durable `(capacity, length)` pair backed by the `HEADER` file.
//!
//! ## File Format
//! One entry per line: `"<capacity> <length>\n"`. Entries are appended on
//! every mutation; only the **last complete line** is authoritative on load,
//! so a partial trailing write (crash mid-append) recovers to the previous
//! consistent state.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{DuravecError, Result};

/// File name of the metadata header inside a backing directory
pub const HEADER_FILE_NAME: &str = "HEADER";

/// Writer handle for the metadata header
///
/// Holds one open append stream for the lifetime of the vector handle and
/// flushes after every save.
pub struct HeaderFile {
    file: File,
}

impl HeaderFile {
    /// Load the authoritative `(capacity, length)` pair from an existing header
    ///
    /// Scans all appended entries in order and keeps the last complete one.
    /// An unterminated trailing line is discarded. A file with no complete
    /// entries recovers to `(0, 0)` — the state before the first append.
    pub fn load(path: &Path) -> Result<(u64, u64)> {
        let contents = std::fs::read_to_string(path)?;

        let mut state = (0u64, 0u64);
        for line in contents.split_inclusive('\n') {
            let Some(entry) = line.strip_suffix('\n') else {
                // Partial trailing write; the previous entry stays authoritative
                tracing::warn!(?path, "discarding incomplete trailing header entry");
                break;
            };
            state = Self::parse_entry(entry)?;
        }

        tracing::debug!(
            capacity = state.0,
            length = state.1,
            ?path,
            "loaded header"
        );
        Ok(state)
    }

    /// Create or truncate the header and return an open append handle
    ///
    /// Called once per vector handle, after recovery has read any previous
    /// state. Truncating here keeps the file from growing without bound
    /// across sessions.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self { file })
    }

    /// Append a `(capacity, length)` entry and flush it to disk
    pub fn save(&mut self, capacity: u64, length: u64) -> Result<()> {
        self.file
            .write_all(format!("{} {}\n", capacity, length).as_bytes())?;
        self.file.flush()?;
        Ok(())
    }

    /// Parse one complete header entry
    fn parse_entry(entry: &str) -> Result<(u64, u64)> {
        let mut fields = entry.split_whitespace();

        let capacity = Self::parse_field(fields.next(), entry)?;
        let length = Self::parse_field(fields.next(), entry)?;

        if fields.next().is_some() {
            return Err(DuravecError::CorruptHeader(format!(
                "trailing fields in header entry {:?}",
                entry
            )));
        }
        if length > capacity {
            return Err(DuravecError::CorruptHeader(format!(
                "length {} exceeds capacity {}",
                length, capacity
            )));
        }

        Ok((capacity, length))
    }

    fn parse_field(field: Option<&str>, entry: &str) -> Result<u64> {
        field
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| {
                DuravecError::CorruptHeader(format!("malformed header entry {:?}", entry))
            })
    }
}
