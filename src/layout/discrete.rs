//! Discrete block layout
//!
//! One physical file per logical element. Growth pre-allocates a batch of
//! empty files under a freshly created sub-directory; erase deletes the
//! element's file and rewrites the index, which renumbers every later
//! element implicitly since ids are positional.

use std::fs::File;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::{debug, info, trace};

use crate::cache::BlockCache;
use crate::config::Config;
use crate::error::{DuravecError, Result};
use crate::index::{IndexFile, INDEX_FILE_NAME};
use crate::naming::NameGenerator;

use super::BlockLayout;

const BATCH_DIR_NAME_LENGTH: usize = 4;
const ELEMENT_FILE_NAME_LENGTH: usize = 8;
const ELEMENT_FILE_EXTENSION: &str = ".dat";

/// Discrete layout: one file per element
pub struct DiscreteLayout {
    /// Backing directory; all element paths are relative to it
    dir: PathBuf,

    /// Handle to the INDEX file
    index: IndexFile,

    /// Element file paths in logical order; position is the logical id
    elements: Vec<PathBuf>,

    /// Per-element content cache
    cache: BlockCache,

    /// Name generator for batch directories and element files
    names: NameGenerator,

    /// Element files pre-allocated per growth batch
    growth_batch: u64,
}

impl DiscreteLayout {
    /// Initialize against a fresh directory (writes an empty index)
    pub fn create(config: &Config) -> Result<Self> {
        let layout = Self::with_elements(config, Vec::new());
        layout.index.overwrite_discrete(&layout.elements)?;
        Ok(layout)
    }

    /// Open against an existing directory, validating the index against the
    /// recovered capacity
    pub fn open(config: &Config, capacity: u64) -> Result<Self> {
        let index = IndexFile::new(config.data_dir.join(INDEX_FILE_NAME));
        let elements = index.load_discrete(capacity)?;

        debug!(capacity, "loaded discrete element index");

        Ok(Self::with_elements(config, elements))
    }

    fn with_elements(config: &Config, elements: Vec<PathBuf>) -> Self {
        let names = match config.name_seed {
            Some(seed) => NameGenerator::with_seed(seed),
            None => NameGenerator::new(),
        };

        Self {
            dir: config.data_dir.clone(),
            index: IndexFile::new(config.data_dir.join(INDEX_FILE_NAME)),
            elements,
            cache: BlockCache::new(),
            names,
            growth_batch: config.growth_batch,
        }
    }
}

impl BlockLayout for DiscreteLayout {
    fn capacity(&self) -> u64 {
        self.elements.len() as u64
    }

    fn grow(&mut self) -> Result<()> {
        let batch_dir = self.names.fresh_name(&self.dir, BATCH_DIR_NAME_LENGTH, "")?;
        std::fs::create_dir(self.dir.join(&batch_dir))?;

        // Element files are created empty up front so the name generator's
        // existence check holds within the batch
        let mut batch = Vec::with_capacity(self.growth_batch as usize);
        for _ in 0..self.growth_batch {
            let name = self.names.fresh_name(
                &self.dir.join(&batch_dir),
                ELEMENT_FILE_NAME_LENGTH,
                ELEMENT_FILE_EXTENSION,
            )?;
            File::create(self.dir.join(&batch_dir).join(&name))?;
            batch.push(batch_dir.join(name));
        }

        let start_id = self.elements.len() as u64;
        self.index.append_discrete(start_id, &batch)?;
        self.elements.extend(batch);

        info!(
            batch_dir = %batch_dir.display(),
            batch = self.growth_batch,
            capacity = self.elements.len(),
            "grew discrete storage by one batch"
        );
        Ok(())
    }

    fn append(&mut self, id: u64, value: &[u8]) -> Result<()> {
        let rel = self
            .elements
            .get(id as usize)
            .cloned()
            .ok_or_else(|| {
                DuravecError::Storage(format!("append at slot {} beyond allocated capacity", id))
            })?;

        std::fs::write(self.dir.join(&rel), value)?;
        self.cache.invalidate(&rel);
        trace!(id, size = value.len(), "wrote element file");
        Ok(())
    }

    fn read(&mut self, index: u64) -> Result<Bytes> {
        let rel = self.elements[index as usize].clone();
        if let Some(content) = self.cache.get(&rel) {
            trace!(index, "element cache hit");
            return Ok(content);
        }

        let content = Bytes::from(std::fs::read(self.dir.join(&rel))?);
        debug!(index, size = content.len(), "loaded element from disk");
        self.cache.populate(&rel, content.clone());
        Ok(content)
    }

    fn erase(&mut self, index: u64) -> Result<()> {
        let rel = self.elements.remove(index as usize);
        std::fs::remove_file(self.dir.join(&rel))?;
        self.cache.invalidate(&rel);

        // Ids are positional, so the rewrite renumbers everything after the
        // erased element
        self.index.overwrite_discrete(&self.elements)?;

        debug!(index, path = %rel.display(), "erased element file");
        Ok(())
    }
}
