use serde::{Deserialize, Serialize};

use crate::grid::ValueGrid;
use crate::types::{DangerLevel, GameStatus, Tile, GRID_SIZE, LOOKAHEAD_LEN, MIN_TILE_VALUE};

/// Read-only view of a session for renderers and collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub tiles: Vec<Tile>,
    /// Tile values by `[row][col]`, 0 for empty
    pub grid: ValueGrid,
    pub score: u64,
    pub best_score: u64,
    pub status: GameStatus,
    pub has_won: bool,
    pub danger: DangerLevel,
    pub combo_count: u32,
    pub fever_active: bool,
    pub fever_multiplier: u32,
    pub next_values: [u32; LOOKAHEAD_LEN],
    pub can_undo: bool,
    pub episode_id: u32,
    pub move_count: u32,
    pub highest_tile: u32,
}

impl GameSnapshot {
    /// Whether the session still accepts moves
    pub fn playable(&self) -> bool {
        self.status.accepts_moves()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            grid: [[0; GRID_SIZE as usize]; GRID_SIZE as usize],
            score: 0,
            best_score: 0,
            status: GameStatus::Idle,
            has_won: false,
            danger: DangerLevel::Safe,
            combo_count: 0,
            fever_active: false,
            fever_multiplier: 1,
            next_values: [MIN_TILE_VALUE; LOOKAHEAD_LEN],
            can_undo: false,
            episode_id: 0,
            move_count: 0,
            highest_tile: 0,
        }
    }
}
