//! Block index
//!
//! Durable ordered list of block descriptors backed by the `INDEX` file.
//!
//! ## File Format
//! One line per descriptor. Paths are stored relative to the backing
//! directory so a vector can be relocated wholesale.
//!
//! - discrete layout: `"<logicalId> <path>\n"`, one line per element
//! - packed layout:   `"<firstId> <occupancy> <path>\n"`, one line per block
//!
//! Growth appends new lines; erase rewrites the whole file since earlier
//! entries change.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DuravecError, Result};

/// File name of the block index inside a backing directory
pub const INDEX_FILE_NAME: &str = "INDEX";

/// Descriptor of one packed block
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Logical index of the block's first live element
    pub first_id: u64,

    /// Count of live element slots held by the block
    pub occupancy: u64,

    /// Block file path, relative to the backing directory
    pub path: PathBuf,
}

/// Handle to the `INDEX` file of one backing directory
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    // =========================================================================
    // Packed Layout
    // =========================================================================

    /// Load all packed block descriptors
    ///
    /// Validates the descriptor chain against the header's capacity:
    /// adjacent blocks must tile the logical index space and the occupancy
    /// total must equal `capacity`. Anything short or malformed fails fast.
    pub fn load_packed(&self, capacity: u64) -> Result<Vec<BlockRecord>> {
        let contents = std::fs::read_to_string(&self.path)?;

        let mut blocks = Vec::new();
        let mut next_first_id = 0u64;
        for (line_no, line) in contents.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let (Some(first_id), Some(occupancy), Some(path), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(self.corrupt(line_no, "expected <firstId> <occupancy> <path>"));
            };

            let first_id: u64 = first_id
                .parse()
                .map_err(|_| self.corrupt(line_no, "malformed first id"))?;
            let occupancy: u64 = occupancy
                .parse()
                .map_err(|_| self.corrupt(line_no, "malformed occupancy"))?;

            if first_id != next_first_id {
                return Err(self.corrupt(line_no, "blocks do not tile the index space"));
            }
            next_first_id = first_id + occupancy;

            blocks.push(BlockRecord {
                first_id,
                occupancy,
                path: PathBuf::from(path),
            });
        }

        if next_first_id != capacity {
            return Err(DuravecError::CorruptIndex(format!(
                "{}: descriptors cover {} slots but header capacity is {}",
                self.path.display(),
                next_first_id,
                capacity
            )));
        }

        Ok(blocks)
    }

    /// Rewrite the whole index from the given descriptors
    pub fn overwrite_packed(&self, blocks: &[BlockRecord]) -> Result<()> {
        let mut out = String::new();
        for block in blocks {
            Self::push_packed_line(&mut out, block);
        }
        self.overwrite(&out)
    }

    /// Append one descriptor for a freshly grown block
    pub fn append_packed(&self, block: &BlockRecord) -> Result<()> {
        let mut out = String::new();
        Self::push_packed_line(&mut out, block);
        self.append(&out)
    }

    fn push_packed_line(out: &mut String, block: &BlockRecord) {
        out.push_str(&format!(
            "{} {} {}\n",
            block.first_id,
            block.occupancy,
            block.path.display()
        ));
    }

    // =========================================================================
    // Discrete Layout
    // =========================================================================

    /// Load all element paths, in logical order
    ///
    /// The header's capacity implies exactly one line per element slot.
    pub fn load_discrete(&self, capacity: u64) -> Result<Vec<PathBuf>> {
        let contents = std::fs::read_to_string(&self.path)?;

        let mut elements = Vec::with_capacity(capacity as usize);
        for (line_no, line) in contents.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let (Some(id), Some(path), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(self.corrupt(line_no, "expected <logicalId> <path>"));
            };

            let id: u64 = id
                .parse()
                .map_err(|_| self.corrupt(line_no, "malformed logical id"))?;
            if id != line_no as u64 {
                return Err(self.corrupt(line_no, "logical ids out of order"));
            }

            elements.push(PathBuf::from(path));
        }

        if elements.len() as u64 != capacity {
            return Err(DuravecError::CorruptIndex(format!(
                "{}: expected {} element entries, found {}",
                self.path.display(),
                capacity,
                elements.len()
            )));
        }

        Ok(elements)
    }

    /// Rewrite the whole index from the given element paths
    pub fn overwrite_discrete(&self, elements: &[PathBuf]) -> Result<()> {
        let mut out = String::new();
        for (id, path) in elements.iter().enumerate() {
            Self::push_discrete_line(&mut out, id as u64, path);
        }
        self.overwrite(&out)
    }

    /// Append descriptors for a growth batch, starting at `start_id`
    pub fn append_discrete(&self, start_id: u64, elements: &[PathBuf]) -> Result<()> {
        let mut out = String::new();
        for (offset, path) in elements.iter().enumerate() {
            Self::push_discrete_line(&mut out, start_id + offset as u64, path);
        }
        self.append(&out)
    }

    fn push_discrete_line(out: &mut String, id: u64, path: &Path) {
        out.push_str(&format!("{} {}\n", id, path.display()));
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn overwrite(&self, contents: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn append(&self, contents: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn corrupt(&self, line_no: usize, reason: &str) -> DuravecError {
        DuravecError::CorruptIndex(format!(
            "{}:{}: {}",
            self.path.display(),
            line_no + 1,
            reason
        ))
    }
}
