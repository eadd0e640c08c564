//! Packed block layout
//!
//! Many fixed-size slots share one block file. Growth allocates exactly one
//! new block; erase rewrites the owning block without the removed slot and
//! renumbers every later block's first logical id.
//!
//! ## Block File
//! A sequence of slots (see [`crate::slot`]), appended in logical order.
//! A fully populated block is `slots_per_block * slot_size` bytes. The
//! number of slots actually written is derived from the file length.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::{debug, info, trace};

use crate::cache::BlockCache;
use crate::config::Config;
use crate::error::{DuravecError, Result};
use crate::index::{BlockRecord, IndexFile, INDEX_FILE_NAME};
use crate::naming::NameGenerator;
use crate::slot;

use super::BlockLayout;

const BLOCK_FILE_NAME_LENGTH: usize = 8;
const BLOCK_FILE_EXTENSION: &str = ".blk";

/// Packed layout: multi-slot block files
pub struct PackedLayout {
    /// Backing directory; all block paths are relative to it
    dir: PathBuf,

    /// Handle to the INDEX file
    index: IndexFile,

    /// Block descriptors ordered by ascending first id
    blocks: Vec<BlockRecord>,

    /// Per-block content cache
    cache: BlockCache,

    /// Name generator for new block files
    names: NameGenerator,

    /// Total bytes per slot, including the length prefix
    slot_size: usize,

    /// Slots allocated per block file
    slots_per_block: u64,

    /// Total allocated element slots
    capacity: u64,
}

impl PackedLayout {
    /// Initialize against a fresh directory (writes an empty index)
    pub fn create(config: &Config) -> Result<Self> {
        let layout = Self::with_blocks(config, Vec::new(), 0);
        layout.index.overwrite_packed(&layout.blocks)?;
        Ok(layout)
    }

    /// Open against an existing directory, validating the index against the
    /// recovered capacity
    pub fn open(config: &Config, capacity: u64) -> Result<Self> {
        let index = IndexFile::new(config.data_dir.join(INDEX_FILE_NAME));
        let blocks = index.load_packed(capacity)?;

        debug!(
            blocks = blocks.len(),
            capacity, "loaded packed block index"
        );

        Ok(Self::with_blocks(config, blocks, capacity))
    }

    fn with_blocks(config: &Config, blocks: Vec<BlockRecord>, capacity: u64) -> Self {
        let names = match config.name_seed {
            Some(seed) => NameGenerator::with_seed(seed),
            None => NameGenerator::new(),
        };

        Self {
            dir: config.data_dir.clone(),
            index: IndexFile::new(config.data_dir.join(INDEX_FILE_NAME)),
            blocks,
            cache: BlockCache::new(),
            names,
            slot_size: config.slot_size,
            slots_per_block: config.slots_per_block,
            capacity,
        }
    }

    /// Find the block owning a logical index: the last block whose first id
    /// is at or below it. Linear in block count, not slot count.
    fn locate(&self, index: u64) -> usize {
        let mut block_id = 0;
        for (id, block) in self.blocks.iter().enumerate().skip(1) {
            if block.first_id > index {
                break;
            }
            block_id = id;
        }
        block_id
    }

    /// Load a block's raw content, consulting the cache first
    fn block_content(&mut self, block_id: usize) -> Result<Bytes> {
        let rel = self.blocks[block_id].path.clone();
        if let Some(content) = self.cache.get(&rel) {
            trace!(block_id, "block cache hit");
            return Ok(content);
        }

        let content = Bytes::from(std::fs::read(self.dir.join(&rel))?);
        debug!(block_id, size = content.len(), "loaded block from disk");
        self.cache.populate(&rel, content.clone());
        Ok(content)
    }

    /// Rewrite a block's written slots excluding the one holding `index`
    ///
    /// A full block-local rewrite from the start of the file, not a shift of
    /// only the tail. Reads the file directly rather than trusting the cache.
    fn compact(&mut self, block_id: usize, index: u64) -> Result<()> {
        let rel = self.blocks[block_id].path.clone();
        let first_id = self.blocks[block_id].first_id;
        let full_path = self.dir.join(&rel);

        let content = std::fs::read(&full_path)?;
        let written = content.len() / self.slot_size;
        let target = (index - first_id) as usize;
        if target >= written {
            return Err(DuravecError::Storage(format!(
                "block {} holds {} written slots, cannot remove slot {}",
                rel.display(),
                written,
                target
            )));
        }

        let mut remaining = Vec::with_capacity(content.len() - self.slot_size);
        for slot_no in 0..written {
            if slot_no == target {
                continue;
            }
            let start = slot_no * self.slot_size;
            remaining.extend_from_slice(&content[start..start + self.slot_size]);
        }

        std::fs::write(&full_path, &remaining)?;
        self.cache.invalidate(&rel);
        self.blocks[block_id].occupancy -= 1;

        debug!(
            block_id,
            removed = target,
            remaining = written - 1,
            "compacted block"
        );
        Ok(())
    }
}

impl BlockLayout for PackedLayout {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn grow(&mut self) -> Result<()> {
        let name =
            self.names
                .fresh_name(&self.dir, BLOCK_FILE_NAME_LENGTH, BLOCK_FILE_EXTENSION)?;
        File::create(self.dir.join(&name))?;

        let block = BlockRecord {
            first_id: self.capacity,
            occupancy: self.slots_per_block,
            path: name,
        };
        self.index.append_packed(&block)?;

        self.capacity += self.slots_per_block;
        info!(
            path = %block.path.display(),
            first_id = block.first_id,
            capacity = self.capacity,
            "grew packed storage by one block"
        );
        self.blocks.push(block);

        Ok(())
    }

    fn append(&mut self, id: u64, value: &[u8]) -> Result<()> {
        let encoded = slot::encode(value, self.slot_size)?;

        let tail = self.blocks.last().ok_or_else(|| {
            DuravecError::Storage("append with no allocated blocks".to_string())
        })?;
        let rel = tail.path.clone();

        let mut file = OpenOptions::new().append(true).open(self.dir.join(&rel))?;
        file.write_all(&encoded)?;
        file.flush()?;

        self.cache.invalidate(&rel);
        trace!(id, size = value.len(), "appended slot to tail block");
        Ok(())
    }

    fn read(&mut self, index: u64) -> Result<Bytes> {
        let block_id = self.locate(index);
        let content = self.block_content(block_id)?;

        let offset = (index - self.blocks[block_id].first_id) as usize * self.slot_size;
        slot::decode(&content, offset, self.slot_size)
    }

    fn erase(&mut self, index: u64) -> Result<()> {
        let block_id = self.locate(index);
        self.compact(block_id, index)?;

        // Every element after the erased one shifts down by one
        for block in &mut self.blocks[block_id + 1..] {
            block.first_id -= 1;
        }

        if self.blocks[block_id].occupancy == 0 {
            let rel = self.blocks[block_id].path.clone();
            std::fs::remove_file(self.dir.join(&rel))?;
            self.cache.invalidate(&rel);
            self.blocks.remove(block_id);
            info!(path = %rel.display(), "removed empty block");
        }

        self.capacity -= 1;
        self.index.overwrite_packed(&self.blocks)?;
        Ok(())
    }
}
