//! Error types for duravec
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DuravecError
pub type Result<T> = std::result::Result<T, DuravecError>;

/// Unified error type for duravec operations
#[derive(Debug, Error)]
pub enum DuravecError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("index {index} out of range, vector length is {length}")]
    IndexOutOfRange { index: u64, length: u64 },

    #[error("payload of {size} bytes exceeds slot capacity of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // On-Disk State Errors
    // -------------------------------------------------------------------------
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("storage error: {0}")]
    Storage(String),
}
