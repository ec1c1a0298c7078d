//! RNG module - weighted tile generation with a lookahead queue
//!
//! New tiles are 2 with probability 90% and 4 with probability 10% (tunable).
//! The next values are rolled ahead of time into a short queue so the UI can
//! preview them; a value is only consumed when a tile is actually placed.
//!
//! Also provides a simple LCG so every session is reproducible from its seed.

use tracing::debug;

use crate::grid::{Board, TileIds};
use crate::types::{Tile, LOOKAHEAD_LEN, MIN_TILE_VALUE};

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// True with probability `permille / 1000`
    pub fn chance_permille(&mut self, permille: u32) -> bool {
        self.next_range(1000) < permille
    }

    /// Current internal state (feeding it back to `new` continues the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Weighted tile spawner with a fixed-length lookahead queue
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    /// Upcoming values, head first
    queue: [u32; LOOKAHEAD_LEN],
    /// Chance that a rolled value is 4, per mille
    four_permille: u32,
    rng: SimpleRng,
}

impl SpawnScheduler {
    /// Create a scheduler and roll its initial queue
    pub fn new(seed: u32, four_permille: u32) -> Self {
        let mut scheduler = Self {
            queue: [MIN_TILE_VALUE; LOOKAHEAD_LEN],
            four_permille,
            rng: SimpleRng::new(seed),
        };
        scheduler.refill_queue();
        scheduler
    }

    /// Re-roll every queued value (used when a new game starts)
    pub fn refill_queue(&mut self) {
        for i in 0..LOOKAHEAD_LEN {
            self.queue[i] = self.roll_value();
        }
    }

    fn roll_value(&mut self) -> u32 {
        if self.rng.chance_permille(self.four_permille) {
            MIN_TILE_VALUE * 2
        } else {
            MIN_TILE_VALUE
        }
    }

    /// Value the next spawn will place
    pub fn peek(&self) -> u32 {
        self.queue[0]
    }

    /// All upcoming values, head first
    pub fn lookahead(&self) -> [u32; LOOKAHEAD_LEN] {
        self.queue
    }

    /// Place the head of the queue on a uniformly chosen empty cell.
    ///
    /// Returns `None` without touching the queue or the board when the board is full.
    pub fn spawn(&mut self, board: &mut Board, ids: &mut TileIds) -> Option<Tile> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let pos = empty[self.rng.next_range(empty.len() as u32) as usize];
        let value = self.queue[0];
        self.queue.rotate_left(1);
        self.queue[LOOKAHEAD_LEN - 1] = self.roll_value();

        let tile = Tile::spawned(ids.mint(), value, pos);
        board.insert(tile);
        debug!(value, row = pos.row, col = pos.col, "spawned tile");
        Some(tile)
    }

    /// Get the current RNG state (for restarting with the same stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new(1, crate::types::SPAWN_FOUR_PERMILLE)
    }
}
