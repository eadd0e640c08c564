//! Vector engine
//!
//! The public contract: a disk-resident, densely indexed sequence of byte
//! strings with durable `push_back`, random-access `at`, and
//! index-preserving `erase`.
//!
//! ## Responsibilities
//! - Establish a consistent `(capacity, length, index)` triple before
//!   accepting any operation (initialize a fresh directory, or recover an
//!   existing one)
//! - Route operations to the configured block layout
//! - Persist the header after every mutation
//!
//! ## Concurrency Model
//! Single-threaded, blocking I/O. Exactly one handle owns a backing
//! directory at a time; concurrent handles on the same directory are
//! undefined by contract. Mutating operations and cache-populating reads
//! take `&mut self`.

use std::fs;
use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::error::{DuravecError, Result};
use crate::header::{HeaderFile, HEADER_FILE_NAME};
use crate::layout::{self, BlockLayout};

/// A persistent vector of variable-length byte strings
///
/// All state survives process restarts: reopening a handle against the same
/// directory reproduces identical contents.
pub struct PersistentVector {
    /// Engine configuration
    config: Config,

    /// Open append handle to the HEADER file
    header: HeaderFile,

    /// Block storage strategy (owns the index file and block cache)
    layout: Box<dyn BlockLayout>,

    /// Number of live logical elements
    length: u64,
}

impl std::fmt::Debug for PersistentVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentVector")
            .field("config", &self.config)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl PersistentVector {
    /// Open or create a vector with the given config
    ///
    /// A directory without a `HEADER` file is initialized empty; a directory
    /// with one is recovered from its header and index. Either way the
    /// on-disk state is consistent before this returns.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        let header_path = config.data_dir.join(HEADER_FILE_NAME);

        let (capacity, length, layout) = if header_path.exists() {
            let (capacity, length) = HeaderFile::load(&header_path)?;
            let layout = layout::open(&config, capacity)?;
            info!(
                dir = %config.data_dir.display(),
                capacity,
                length,
                "recovered existing vector"
            );
            (capacity, length, layout)
        } else {
            let layout = layout::create(&config)?;
            info!(dir = %config.data_dir.display(), "initialized empty vector");
            (0, 0, layout)
        };

        // Re-establish the append stream with a fresh snapshot so the header
        // does not grow without bound across sessions
        let mut header = HeaderFile::create(&header_path)?;
        header.save(capacity, length)?;

        Ok(Self {
            config,
            header,
            layout,
            length,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses the default config with the specified backing directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Number of live elements. Always O(1).
    pub fn size(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Read the element at `index`
    ///
    /// Returns a cheap shared view into the owning block's cached content;
    /// a miss loads the block from disk first.
    pub fn at(&mut self, index: u64) -> Result<Bytes> {
        self.check_bounds(index)?;
        self.layout.read(index)
    }

    /// Append `value` at the end of the vector
    ///
    /// Grows storage when all allocated slots are in use, then writes the
    /// value and durably updates the header before returning.
    pub fn push_back(&mut self, value: &[u8]) -> Result<()> {
        if self.length >= self.layout.capacity() {
            self.layout.grow()?;
            self.header.save(self.layout.capacity(), self.length)?;
        }

        self.layout.append(self.length, value)?;
        self.length += 1;
        self.header.save(self.layout.capacity(), self.length)?;
        Ok(())
    }

    /// Remove the element at `index`, shifting every later element down
    ///
    /// Compacts the owning block, renumbers later blocks, rewrites the
    /// index, and durably updates the header before returning.
    pub fn erase(&mut self, index: u64) -> Result<()> {
        self.check_bounds(index)?;

        self.layout.erase(index)?;
        self.length -= 1;
        self.header.save(self.layout.capacity(), self.length)?;
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Total element slots currently allocated
    pub fn capacity(&self) -> u64 {
        self.layout.capacity()
    }

    /// Get the backing directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_bounds(&self, index: u64) -> Result<()> {
        if index >= self.length {
            return Err(DuravecError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(())
    }
}
