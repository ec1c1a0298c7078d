//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond conversions, so they can be
//! used in any context (core logic, terminal runner, collaborator layers such as
//! audio or achievements).
//!
//! # Grid
//!
//! The board is a fixed 4x4 grid:
//!
//! - **Rows**: indexed 0-3, top to bottom
//! - **Columns**: indexed 0-3, left to right
//! - **Tiles**: powers of two, starting at 2
//!
//! # Default Tuning
//!
//! These are the defaults used by `EngineConfig` in the core crate. Every one of
//! them can be overridden per session.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WIN_VALUE` | 2048 | Tile value that marks the session as won |
//! | `COMBO_WINDOW_MS` | 1500 | Time allowed between scoring moves to keep a combo |
//! | `FEVER_COMBO_THRESHOLD` | 5 | Combo count that switches fever on |
//! | `FEVER_MULTIPLIER` | 2 | Score multiplier while fever is active |
//! | `FEVER_TIMEOUT_MS` | 2000 | Time without a scoring move that ends fever |
//! | `SPAWN_FOUR_PERMILLE` | 100 | Chance (per mille) that a spawned tile is a 4 |
//! | `LOOKAHEAD_LEN` | 2 | Number of upcoming spawn values exposed for preview |
//!
//! # Danger Levels
//!
//! | Empty cells | Level |
//! |-------------|-------|
//! | 5+ | `Safe` |
//! | 3-4 | `Warning` |
//! | 2 | `Critical` |
//! | 0-1 | `Imminent` |
//!
//! # Examples
//!
//! ```
//! use tile_merge_types::{Direction, GameAction, Position, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!(dir.is_horizontal());
//!
//! // Parse a game action
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! // Grid dimensions
//! assert_eq!(GRID_SIZE, 4);
//! assert_eq!(Position::new(1, 2).index(), 6);
//! ```

use serde::{Deserialize, Serialize};

/// Grid side length in cells (4x4)
pub const GRID_SIZE: u8 = 4;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Value of the smallest tile that can exist
pub const MIN_TILE_VALUE: u32 = 2;

/// Tile value that wins the game (2048)
pub const WIN_VALUE: u32 = 2048;

/// Combo window in milliseconds (1.5s between scoring moves)
pub const COMBO_WINDOW_MS: u64 = 1500;

/// Combo count at which fever activates
pub const FEVER_COMBO_THRESHOLD: u32 = 5;

/// Applied score multiplier while fever is active
pub const FEVER_MULTIPLIER: u32 = 2;

/// Fever ends after this long without a scoring move (2s)
pub const FEVER_TIMEOUT_MS: u64 = 2000;

/// Chance that a spawned tile is a 4, in per mille (100 = 10%)
pub const SPAWN_FOUR_PERMILLE: u32 = 100;

/// Number of upcoming spawn values kept in the lookahead queue
pub const LOOKAHEAD_LEN: usize = 2;

/// Tile values that fire a one-shot milestone event the first time they appear in a game
pub const MILESTONES: [u32; 7] = [128, 256, 512, 1024, 2048, 4096, 8192];

/// Upper bound (inclusive) on empty cells for `DangerLevel::Warning`
pub const WARNING_MAX_EMPTY: usize = 4;

/// Upper bound (inclusive) on empty cells for `DangerLevel::Critical`
pub const CRITICAL_MAX_EMPTY: usize = 2;

/// Upper bound (inclusive) on empty cells for `DangerLevel::Imminent`
pub const IMMINENT_MAX_EMPTY: usize = 1;

/// Undo uses allowed per session
pub const DEFAULT_UNDO_LIMIT: u32 = 1;

/// A 4x4 board can produce at most two merges per line
pub const MAX_MERGES_PER_MOVE: usize = (GRID_SIZE as usize / 2) * GRID_SIZE as usize;


/// The four move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_merge_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Left/Right moves operate on rows, Up/Down on columns
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Right/Down lines are read back to front so merging always runs toward index 0
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Commands accepted by a game session
///
/// These are used by both the terminal runner and any scripted driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide and merge every tile in the given direction
    Move(Direction),
    /// Rewind the last successful move (limited uses per session)
    Undo,
    /// Throw the current session away and start over
    NewGame,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_merge_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("left"), Some(GameAction::Move(Direction::Left)));
    /// assert_eq!(GameAction::from_str("moveRight"), Some(GameAction::Move(Direction::Right)));
    /// assert_eq!(GameAction::from_str("undo"), Some(GameAction::Undo));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "undo" => Some(GameAction::Undo),
            "newgame" | "restart" => Some(GameAction::NewGame),
            other => {
                let dir = other.strip_prefix("move").unwrap_or(other);
                Direction::from_str(dir).map(GameAction::Move)
            }
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Undo => "undo",
            GameAction::NewGame => "newGame",
        }
    }
}

/// Identifier of a tile instance.
///
/// Minted from a per-session monotonic counter. A merge destroys both source
/// tiles and mints a fresh id for the result, so ids never survive a merge.
pub type TileId = u64;

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major flat index
    pub fn index(&self) -> usize {
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            row: (index / GRID_SIZE as usize) as u8,
            col: (index % GRID_SIZE as usize) as u8,
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }
}

/// A numbered tile living on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    /// Placed by the spawn that followed the latest move
    pub just_spawned: bool,
    /// Produced by a merge during the latest move
    pub just_merged: bool,
}

impl Tile {
    /// A settled tile with no transient flags
    pub fn new(id: TileId, value: u32, pos: Position) -> Self {
        Self {
            id,
            value,
            row: pos.row,
            col: pos.col,
            just_spawned: false,
            just_merged: false,
        }
    }

    pub fn spawned(id: TileId, value: u32, pos: Position) -> Self {
        Self {
            just_spawned: true,
            ..Self::new(id, value, pos)
        }
    }

    pub fn merged(id: TileId, value: u32, pos: Position) -> Self {
        Self {
            just_merged: true,
            ..Self::new(id, value, pos)
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Tile)`: Cell occupied by the tile
pub type Cell = Option<Tile>;

/// Session lifecycle state
///
/// `Won` keeps accepting moves; `GameOver` freezes the session until a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Idle,
    Playing,
    Won,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::GameOver => "gameOver",
        }
    }

    /// Whether `apply_move` and `undo` are accepted in this state
    pub fn accepts_moves(&self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Won)
    }
}

/// Coarse classification of how close the board is to being full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DangerLevel {
    Safe,
    Warning,
    Critical,
    Imminent,
}

impl DangerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DangerLevel::Safe => "safe",
            DangerLevel::Warning => "warning",
            DangerLevel::Critical => "critical",
            DangerLevel::Imminent => "imminent",
        }
    }
}

/// Notification emitted by the engine for collaborators (audio, haptics,
/// achievements, sharing, persistence).
///
/// The engine never calls collaborators; the orchestration layer fans these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A merge produced a tile of `value`
    Merge { value: u32 },
    /// `value` appeared for the first time this game and is in the milestone set
    MilestoneReached { value: u32 },
    /// First tile at or above the win value; fires once per session
    Win,
    GameOver { final_score: u64, highest_tile: u32 },
    ComboChange { count: u32 },
    FeverChange { active: bool },
    /// The best score moved; persistence collaborators store this value
    NewBestScore { score: u64 },
}
