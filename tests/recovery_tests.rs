//! Tests for reopen durability and recovery
//!
//! These tests verify:
//! - Closing and reopening a handle reproduces identical contents
//! - Recovery after erase, across both layouts
//! - A truncated trailing header entry recovers the previous state
//! - The large packed scenario: 100 002 elements, erase in the middle

use std::path::Path;

use duravec::{Config, DuravecError, LayoutKind, PersistentVector};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const LAYOUTS: [LayoutKind; 2] = [LayoutKind::Discrete, LayoutKind::Packed];

fn test_config(dir: &Path, layout: LayoutKind) -> Config {
    Config::builder()
        .data_dir(dir)
        .layout(layout)
        .slot_size(64)
        .slots_per_block(4)
        .growth_batch(8)
        .build()
}

// =============================================================================
// Reopen Durability
// =============================================================================

#[test]
fn test_reopen_reproduces_contents() {
    for layout in LAYOUTS {
        let temp = TempDir::new().unwrap();

        {
            let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
            for i in 0..25 {
                vec.push_back(format!("value {}", i).as_bytes()).unwrap();
            }
        }

        let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
        assert_eq!(vec.size(), 25);
        for i in 0..25u64 {
            assert_eq!(
                vec.at(i).unwrap().as_ref(),
                format!("value {}", i).as_bytes()
            );
        }
    }
}

#[test]
fn test_reopen_after_erase() {
    for layout in LAYOUTS {
        let temp = TempDir::new().unwrap();

        {
            let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
            for i in 0..10 {
                vec.push_back(format!("value {}", i).as_bytes()).unwrap();
            }
            vec.erase(4).unwrap();
        }

        let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
        assert_eq!(vec.size(), 9);
        assert_eq!(vec.at(3).unwrap().as_ref(), b"value 3");
        assert_eq!(vec.at(4).unwrap().as_ref(), b"value 5");
    }
}

#[test]
fn test_reopen_empty_vector() {
    for layout in LAYOUTS {
        let temp = TempDir::new().unwrap();

        drop(PersistentVector::open(test_config(temp.path(), layout)).unwrap());

        let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
        assert_eq!(vec.size(), 0);
        assert!(vec.at(0).is_err());
    }
}

#[test]
fn test_push_continues_after_reopen() {
    for layout in LAYOUTS {
        let temp = TempDir::new().unwrap();

        {
            let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
            vec.push_back(b"before").unwrap();
        }

        let mut vec = PersistentVector::open(test_config(temp.path(), layout)).unwrap();
        vec.push_back(b"after").unwrap();

        assert_eq!(vec.size(), 2);
        assert_eq!(vec.at(0).unwrap().as_ref(), b"before");
        assert_eq!(vec.at(1).unwrap().as_ref(), b"after");
    }
}

// =============================================================================
// Header Recovery
// =============================================================================

#[test]
fn test_truncated_header_entry_recovers_previous_state() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), LayoutKind::Packed);

    {
        let mut vec = PersistentVector::open(config.clone()).unwrap();
        for i in 0..6 {
            vec.push_back(format!("value {}", i).as_bytes()).unwrap();
        }
    }

    // Simulate a crash mid-append of a header entry
    let header_path = temp.path().join("HEADER");
    let mut contents = std::fs::read(&header_path).unwrap();
    contents.extend_from_slice(b"999");
    std::fs::write(&header_path, contents).unwrap();

    let mut vec = PersistentVector::open(config).unwrap();
    assert_eq!(vec.size(), 6);
    assert_eq!(vec.at(5).unwrap().as_ref(), b"value 5");
}

#[test]
fn test_missing_index_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path(), LayoutKind::Packed);

    {
        let mut vec = PersistentVector::open(config.clone()).unwrap();
        vec.push_back(b"value").unwrap();
    }

    // Drop the index entries while the header still claims capacity
    std::fs::write(temp.path().join("INDEX"), b"").unwrap();

    let err = PersistentVector::open(config).unwrap_err();
    assert!(matches!(err, DuravecError::CorruptIndex(_)));
}

// =============================================================================
// Large Scenario (packed layout, default geometry)
// =============================================================================

#[test]
fn test_large_packed_scenario_with_erase_and_reopen() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .layout(LayoutKind::Packed)
        .build();

    let all_bytes: Vec<u8> = (0u8..=255).collect();

    {
        let mut vec = PersistentVector::open(config.clone()).unwrap();

        vec.push_back(b"foo").unwrap();
        vec.push_back(&all_bytes).unwrap();
        for i in 0..100_000 {
            vec.push_back(format!("loop {}", i).as_bytes()).unwrap();
        }

        assert_eq!(vec.size(), 100_002);
        assert_eq!(vec.at(0).unwrap().as_ref(), b"foo");
        assert_eq!(vec.at(1).unwrap().as_ref(), all_bytes.as_slice());
        assert_eq!(vec.at(873).unwrap().as_ref(), b"loop 871");
    }

    {
        let mut vec = PersistentVector::open(config.clone()).unwrap();
        assert_eq!(vec.size(), 100_002);
        assert_eq!(vec.at(873).unwrap().as_ref(), b"loop 871");

        vec.erase(873).unwrap();

        assert_eq!(vec.size(), 100_001);
        assert_eq!(vec.at(0).unwrap().as_ref(), b"foo");
        assert_eq!(vec.at(1).unwrap().as_ref(), all_bytes.as_slice());
        assert_eq!(vec.at(873).unwrap().as_ref(), b"loop 872");
    }

    let mut vec = PersistentVector::open(config).unwrap();
    assert_eq!(vec.size(), 100_001);
    assert_eq!(vec.at(873).unwrap().as_ref(), b"loop 872");

    vec.erase(873).unwrap();
    assert_eq!(vec.size(), 100_000);
    assert_eq!(vec.at(873).unwrap().as_ref(), b"loop 873");
}
