//! Slot codec for the packed layout
//!
//! Every element in a packed block occupies one fixed-size slot.
//!
//! ## Slot Format
//! ```text
//! ┌────────────┬───────────────────────┬──────────────────┐
//! │ Len (8 LE) │        Payload        │   Zero Padding   │
//! └────────────┴───────────────────────┴──────────────────┘
//! │◄──────────────────── slot_size ──────────────────────►│
//! ```
//!
//! The decoder trusts the length prefix, never the full slot width, so
//! padding bytes are never returned to callers.

use bytes::Bytes;

use crate::error::{DuravecError, Result};

/// Width of the little-endian length prefix at the start of each slot
pub const PREFIX_WIDTH: usize = 8;

/// Largest payload a slot of the given total size can hold
pub fn max_payload(slot_size: usize) -> usize {
    slot_size.saturating_sub(PREFIX_WIDTH)
}

/// Encode a payload into a fixed-size slot
///
/// Fails with `PayloadTooLarge` when the payload plus prefix would not fit.
pub fn encode(payload: &[u8], slot_size: usize) -> Result<Vec<u8>> {
    let max = max_payload(slot_size);
    if payload.len() > max {
        return Err(DuravecError::PayloadTooLarge {
            size: payload.len(),
            max,
        });
    }

    let mut slot = vec![0u8; slot_size];
    slot[..PREFIX_WIDTH].copy_from_slice(&(payload.len() as u64).to_le_bytes());
    slot[PREFIX_WIDTH..PREFIX_WIDTH + payload.len()].copy_from_slice(payload);

    Ok(slot)
}

/// Decode the payload of the slot starting at `offset` within a block
///
/// Returns a zero-copy view into the block buffer.
pub fn decode(block: &Bytes, offset: usize, slot_size: usize) -> Result<Bytes> {
    if offset + slot_size > block.len() {
        return Err(DuravecError::Storage(format!(
            "slot at offset {} exceeds block of {} bytes",
            offset,
            block.len()
        )));
    }

    let prefix: [u8; PREFIX_WIDTH] = block[offset..offset + PREFIX_WIDTH]
        .try_into()
        .expect("prefix slice has fixed width");
    let payload_len = u64::from_le_bytes(prefix) as usize;

    if payload_len > max_payload(slot_size) {
        return Err(DuravecError::Storage(format!(
            "slot at offset {} claims {} payload bytes, slot holds at most {}",
            offset,
            payload_len,
            max_payload(slot_size)
        )));
    }

    let start = offset + PREFIX_WIDTH;
    Ok(block.slice(start..start + payload_len))
}
