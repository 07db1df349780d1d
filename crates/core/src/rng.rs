//! RNG module - random tile spawning
//!
//! New tiles land on a uniformly chosen empty cell. The tile is a 2 with
//! probability 0.9 and a 4 otherwise.
//!
//! Spawning takes any [`rand::Rng`], so callers can pass a thread RNG, a seeded
//! `StdRng`, or the [`SimpleRng`] below for fully reproducible games.

use rand::{Rng, RngCore, SeedableRng};

use crate::board::Board;
use crate::types::{SPAWN_HIGH_TILE, SPAWN_LOW_PROBABILITY, SPAWN_LOW_TILE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pick the value of a new tile
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    if rng.gen::<f64>() < SPAWN_LOW_PROBABILITY {
        SPAWN_LOW_TILE
    } else {
        SPAWN_HIGH_TILE
    }
}

/// Place one random tile on an empty cell.
///
/// Returns `(row, col, value)` of the new tile, or `None` when the board is
/// full (nothing is changed in that case).
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<(usize, usize, u64)> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    // floor(u * n) with u in [0, 1); clamp guards against rounding up to n.
    let u = rng.gen::<f64>();
    let pick = ((u * empty.len() as f64) as usize).min(empty.len() - 1);
    let idx = empty[pick];

    let value = random_tile_value(rng);
    let side = board.side();
    let (row, col) = (idx / side, idx % side);
    board.set(row, col, value);
    Some((row, col, value))
}

/// Return a copy of `board` with one random tile added
pub fn with_random_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let mut out = *board;
    spawn_tile(&mut out, rng);
    out
}
