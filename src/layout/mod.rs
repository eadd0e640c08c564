//! Block layout strategies
//!
//! A vector's elements map to on-disk blocks through one of two
//! interchangeable layouts behind the `BlockLayout` trait:
//!
//! - [`DiscreteLayout`]: one physical file per element, pre-allocated in
//!   growth batches under randomly named sub-directories.
//! - [`PackedLayout`]: fixed-size slots packed into shared block files,
//!   reclaimed by an in-place rewrite on erase.
//!
//! Both share the header/index metadata model; the layout owns the index
//! file and the block cache, while the engine owns length and the header.

mod discrete;
mod packed;

pub use discrete::DiscreteLayout;
pub use packed::PackedLayout;

use bytes::Bytes;

use crate::config::{Config, LayoutKind};
use crate::error::Result;

/// Strategy interface for mapping logical indices to block storage
///
/// Implementations persist their own index-file entries; the caller persists
/// the header after every mutating call.
pub trait BlockLayout {
    /// Total element slots currently allocated across all blocks
    fn capacity(&self) -> u64;

    /// Allocate a new batch of storage and append its descriptors to the
    /// index. Returns with `capacity()` increased.
    fn grow(&mut self) -> Result<()>;

    /// Write `value` as the element with logical index `id` (the current
    /// length). Requires `id < capacity()`.
    fn append(&mut self, id: u64, value: &[u8]) -> Result<()>;

    /// Read the element at `index`, consulting the block cache first
    fn read(&mut self, index: u64) -> Result<Bytes>;

    /// Remove the element at `index`: compact the owning block, renumber
    /// later blocks, and rewrite the index. Decrements `capacity()` by one.
    fn erase(&mut self, index: u64) -> Result<()>;
}

/// Initialize the configured layout against a fresh directory
pub fn create(config: &Config) -> Result<Box<dyn BlockLayout>> {
    Ok(match config.layout {
        LayoutKind::Discrete => Box::new(DiscreteLayout::create(config)?),
        LayoutKind::Packed => Box::new(PackedLayout::create(config)?),
    })
}

/// Open the configured layout against an existing directory
///
/// `capacity` comes from the recovered header and is validated against the
/// index contents.
pub fn open(config: &Config, capacity: u64) -> Result<Box<dyn BlockLayout>> {
    Ok(match config.layout {
        LayoutKind::Discrete => Box::new(DiscreteLayout::open(config, capacity)?),
        LayoutKind::Packed => Box::new(PackedLayout::open(config, capacity)?),
    })
}
