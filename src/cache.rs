//! Block cache
//!
//! Lazily populated in-memory copies of block content, keyed by the block's
//! relative path. An entry is cleared unconditionally whenever its block is
//! mutated; there is no partial update. Losing an entry only costs a reload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Per-block byte cache
///
/// `Bytes` handles are cheap to clone, so a hit hands the caller a shared
/// view without copying the block.
#[derive(Default)]
pub struct BlockCache {
    entries: HashMap<PathBuf, Bytes>,
}

impl BlockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached content of a block, if present
    pub fn get(&self, path: &Path) -> Option<Bytes> {
        self.entries.get(path).cloned()
    }

    /// Store the content of a freshly loaded block
    pub fn populate(&mut self, path: &Path, content: Bytes) {
        self.entries.insert(path.to_path_buf(), content);
    }

    /// Drop a block's entry after any mutation touching it
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Number of cached blocks (for tests and debugging)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
