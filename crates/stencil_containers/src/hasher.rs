//! Incremental rotate-xor hashing.
//!
//! Each update rotates the state left by one bit and mixes in the next word.
//! Ordered collections fold their element hashes through one hasher;
//! unordered collections XOR independently computed element hashes so the
//! result does not depend on iteration order.

use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::OnceLock;

use stencil_foundation::HasherPolicy;

/// Default seed for every hasher.
pub const SEED: u64 = 0;

static PROCESS_SEED: OnceLock<u64> = OnceLock::new();

/// Rotate-left-by-one, xor-in hasher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotateXor {
    state: u64,
}

impl RotateXor {
    /// Creates a hasher starting from `seed`.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Mixes one word into the state.
    pub fn update(&mut self, word: u64) {
        self.state = self.state.rotate_left(1) ^ word;
    }
}

impl Default for RotateXor {
    fn default() -> Self {
        Self::with_seed(SEED)
    }
}

impl Hasher for RotateXor {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.update(u64::from_le_bytes(word));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.update(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.update(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.update(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.update(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.update(i as u64);
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_i32(&mut self, i: i32) {
        self.update(i as u64);
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_i64(&mut self, i: i64) {
        self.update(i as u64);
    }
}

/// Builds [`RotateXor`] hashers with a fixed seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotateXorState {
    seed: u64,
}

impl RotateXorState {
    /// Creates a builder using `seed`.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Creates a builder seeded as `policy` prescribes. Randomized builders
    /// share one seed per process, so equal tables hash equally.
    #[must_use]
    pub fn from_policy(policy: HasherPolicy) -> Self {
        match policy {
            HasherPolicy::Seeded(seed) => Self::with_seed(seed),
            HasherPolicy::Randomized => Self::with_seed(*PROCESS_SEED.get_or_init(rand::random)),
        }
    }

    /// Seed every hasher built here starts from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RotateXorState {
    fn default() -> Self {
        Self::with_seed(SEED)
    }
}

impl BuildHasher for RotateXorState {
    type Hasher = RotateXor;

    fn build_hasher(&self) -> RotateXor {
        RotateXor::with_seed(self.seed)
    }
}

/// Hashes a sequence in order.
pub fn sequential<'a, T: Hash + 'a>(items: impl IntoIterator<Item = &'a T>) -> u64 {
    let mut hasher = RotateXor::default();
    for item in items {
        hasher.update(RotateXorState::default().hash_one(item));
    }
    hasher.finish()
}

/// Hashes an unordered collection: the seed XORed with every element hash.
pub fn unordered<'a, T: Hash + 'a>(items: impl IntoIterator<Item = &'a T>) -> u64 {
    let builder = RotateXorState::default();
    items
        .into_iter()
        .fold(SEED, |acc, item| acc ^ builder.hash_one(item))
}
