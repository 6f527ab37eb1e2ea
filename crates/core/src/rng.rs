//! RNG module - random tile values, piece kinds, and engine-local identities
//!
//! Both engines are generic over [`rand::Rng`] so callers can plug in a seeded
//! generator for reproducible games. The default is [`StdRng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::TetrominoKind;

/// Create a deterministic generator from a seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Roll a spawn value: 4 with probability `four_probability`, 2 otherwise
pub fn roll_tile_value<R: Rng + ?Sized>(rng: &mut R, four_probability: f64) -> u32 {
    if rng.gen::<f64>() < four_probability {
        4
    } else {
        2
    }
}

/// Pick one of the seven kinds uniformly
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> TetrominoKind {
    TetrominoKind::ALL[rng.gen_range(0..TetrominoKind::ALL.len())]
}

/// Monotonic id generator, local to one engine instance
///
/// Ids start at 1 and are never reused, even across resets.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Last id handed out (0 if none)
    pub fn last(&self) -> u64 {
        self.last
    }
}
