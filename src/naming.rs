//! Block file naming
//!
//! Generates fixed-length random names for block files and growth-batch
//! directories. The generator is owned by the layout rather than reaching
//! for process-global RNG state, so seeding it makes naming deterministic.
//! Candidate names are checked for existence and regenerated on collision.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DuravecError, Result};

const SYMBOLS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Attempts before giving up on finding an unused name
const MAX_ATTEMPTS: usize = 64;

/// Random name generator for block storage
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministically seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a name of `len` symbols plus `suffix` that does not yet
    /// exist under `dir`, returning the name (not the full path)
    pub fn fresh_name(&mut self, dir: &Path, len: usize, suffix: &str) -> Result<PathBuf> {
        for _ in 0..MAX_ATTEMPTS {
            let mut name = self.random_symbols(len);
            name.push_str(suffix);

            if !dir.join(&name).exists() {
                return Ok(PathBuf::from(name));
            }
        }

        Err(DuravecError::Storage(format!(
            "no unused {}-symbol name found under {} after {} attempts",
            len,
            dir.display(),
            MAX_ATTEMPTS
        )))
    }

    fn random_symbols(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| SYMBOLS[self.rng.gen_range(0..SYMBOLS.len())] as char)
            .collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}
