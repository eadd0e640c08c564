//! # duravec
//!
//! A disk-resident persistent vector: an ordered, densely indexed sequence
//! of variable-length byte strings that materializes its state entirely as
//! files and survives process restarts.
//!
//! - Durable append-only writes (`push_back`)
//! - Random-access reads through a lazily populated block cache (`at`)
//! - Index-preserving erase with block compaction (`erase`)
//! - Metadata recovery that tolerates a partially written header
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PersistentVector                        │
//! │                 (size / at / push_back / erase)             │
//! └───────────┬─────────────────────────────────┬───────────────┘
//!             │                                 │
//!             ▼                                 ▼
//!      ┌─────────────┐                 ┌─────────────────┐
//!      │ HeaderFile  │                 │   BlockLayout   │
//!      │  (HEADER)   │                 │ (strategy trait)│
//!      └─────────────┘                 └───────┬─────────┘
//!                                              │
//!                          ┌───────────────────┼──────────────────┐
//!                          ▼                   ▼                  ▼
//!                   ┌────────────┐      ┌────────────┐     ┌────────────┐
//!                   │ IndexFile  │      │ BlockCache │     │ Slot Codec │
//!                   │  (INDEX)   │      │  (Bytes)   │     │  (packed)  │
//!                   └────────────┘      └────────────┘     └────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod slot;
pub mod header;
pub mod index;
pub mod cache;
pub mod naming;
pub mod layout;
pub mod vector;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::{Config, LayoutKind};
pub use error::{DuravecError, Result};
pub use vector::PersistentVector;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of duravec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
