//! Tests for the block cache and file naming
//!
//! These tests verify:
//! - Miss / populate / hit / invalidate lifecycle
//! - Name generation is deterministic under a fixed seed and skips
//!   colliding names

use std::path::Path;

use bytes::Bytes;
use duravec::cache::BlockCache;
use duravec::naming::NameGenerator;
use tempfile::TempDir;

// =============================================================================
// BlockCache
// =============================================================================

#[test]
fn test_cache_miss_then_hit() {
    let mut cache = BlockCache::new();
    let path = Path::new("aaaa.blk");

    assert!(cache.get(path).is_none());

    cache.populate(path, Bytes::from_static(b"content"));
    assert_eq!(cache.get(path).unwrap().as_ref(), b"content");
}

#[test]
fn test_invalidate_clears_entry() {
    let mut cache = BlockCache::new();
    let path = Path::new("aaaa.blk");

    cache.populate(path, Bytes::from_static(b"content"));
    cache.invalidate(path);

    assert!(cache.get(path).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_invalidate_is_idempotent() {
    let mut cache = BlockCache::new();
    let path = Path::new("aaaa.blk");

    cache.invalidate(path);
    assert!(cache.is_empty());
}

#[test]
fn test_entries_are_independent_per_block() {
    let mut cache = BlockCache::new();

    cache.populate(Path::new("a.blk"), Bytes::from_static(b"a"));
    cache.populate(Path::new("b.blk"), Bytes::from_static(b"b"));
    cache.invalidate(Path::new("a.blk"));

    assert!(cache.get(Path::new("a.blk")).is_none());
    assert_eq!(cache.get(Path::new("b.blk")).unwrap().as_ref(), b"b");
    assert_eq!(cache.len(), 1);
}

// =============================================================================
// NameGenerator
// =============================================================================

#[test]
fn test_seeded_generator_is_deterministic() {
    let temp = TempDir::new().unwrap();

    let name_a = NameGenerator::with_seed(42)
        .fresh_name(temp.path(), 8, ".blk")
        .unwrap();
    let name_b = NameGenerator::with_seed(42)
        .fresh_name(temp.path(), 8, ".blk")
        .unwrap();

    assert_eq!(name_a, name_b);
}

#[test]
fn test_generated_names_have_requested_shape() {
    let temp = TempDir::new().unwrap();
    let mut names = NameGenerator::with_seed(1);

    let name = names.fresh_name(temp.path(), 8, ".dat").unwrap();
    let name = name.to_string_lossy();

    assert_eq!(name.len(), 12);
    assert!(name.ends_with(".dat"));
    assert!(name[..8]
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[test]
fn test_colliding_name_is_skipped() {
    let temp = TempDir::new().unwrap();

    // First draw from this seed becomes an existing file
    let taken = NameGenerator::with_seed(9)
        .fresh_name(temp.path(), 8, ".blk")
        .unwrap();
    std::fs::write(temp.path().join(&taken), b"").unwrap();

    let fresh = NameGenerator::with_seed(9)
        .fresh_name(temp.path(), 8, ".blk")
        .unwrap();

    assert_ne!(fresh, taken);
    assert!(!temp.path().join(&fresh).exists());
}
