//! Configuration for duravec
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// On-disk layout strategy for a vector's backing directory
///
/// Both layouts share the same header/index metadata model; they differ in
/// how blocks map to elements. The layout must match across reopens of the
/// same directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// One physical file per logical element, grouped in growth batches
    Discrete,

    /// Fixed-size slots packed into shared block files, reclaimed by
    /// in-place rewrite on erase
    Packed,
}

/// Main configuration for a persistent vector instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing directory for all vector state
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── HEADER           (capacity/length metadata)
    ///     ├── INDEX            (block descriptors)
    ///     └── block storage    (per-element files or packed block files)
    pub data_dir: PathBuf,

    /// Which on-disk layout to use
    pub layout: LayoutKind,

    // -------------------------------------------------------------------------
    // Packed Layout Geometry
    // -------------------------------------------------------------------------
    /// Total bytes per slot, including the 8-byte length prefix
    ///
    /// The largest storable payload is `slot_size - 8` bytes. Must not
    /// change across reopens of the same directory.
    pub slot_size: usize,

    /// Number of slots allocated per packed block file
    pub slots_per_block: u64,

    // -------------------------------------------------------------------------
    // Discrete Layout Geometry
    // -------------------------------------------------------------------------
    /// Number of element files pre-allocated per growth batch
    pub growth_batch: u64,

    // -------------------------------------------------------------------------
    // Naming
    // -------------------------------------------------------------------------
    /// Seed for the file-name generator; `None` seeds from entropy.
    /// Fixing the seed makes block naming deterministic for tests.
    pub name_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./duravec_data"),
            layout: LayoutKind::Packed,
            slot_size: 4096,
            slots_per_block: 100,
            growth_batch: 10_000,
            name_seed: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the on-disk layout strategy
    pub fn layout(mut self, layout: LayoutKind) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the packed slot size in bytes (including the length prefix)
    pub fn slot_size(mut self, size: usize) -> Self {
        self.config.slot_size = size;
        self
    }

    /// Set the number of slots per packed block
    pub fn slots_per_block(mut self, count: u64) -> Self {
        self.config.slots_per_block = count;
        self
    }

    /// Set the discrete layout's growth batch size
    pub fn growth_batch(mut self, count: u64) -> Self {
        self.config.growth_batch = count;
        self
    }

    /// Seed the file-name generator (deterministic naming)
    pub fn name_seed(mut self, seed: u64) -> Self {
        self.config.name_seed = Some(seed);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
