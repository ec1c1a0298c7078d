//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the tile-merge rules, session state and scoring.
//! It has **zero dependencies** on rendering, audio, input or I/O, making it:
//!
//! - **Deterministic**: Same seed, moves and timestamps produce identical games
//! - **Testable**: Timers are driven by caller-supplied timestamps, never a clock
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 board as a set of tiles, with cell/value views and empty-cell queries
//! - [`resolver`]: Slide-and-merge for one directional move
//! - [`rng`]: Seeded LCG and the weighted spawner with its lookahead queue
//! - [`danger`]: Board-fullness risk level
//! - [`scoring`]: Base score, combo streaks and the fever multiplier
//! - [`undo`]: Single-slot rewind
//! - [`game_state`]: Session lifecycle tying everything together
//! - [`snapshot`]: Read-only session view for renderers and collaborators
//! - [`config`]: Tunables with TOML loading and validation
//!
//! # Game Rules
//!
//! - **Merging**: Two equal neighbours in the move direction become one tile of
//!   double value; a tile merges at most once per move
//! - **Spawning**: After every successful move one tile appears on a random empty
//!   cell: 2 (90%) or 4 (10%)
//! - **Combo**: Scoring moves less than 1.5s apart build a combo
//! - **Fever**: A combo of 5 doubles the score of later scoring moves until 2s pass
//!   without one
//! - **Undo**: One rewind per game
//! - **Win**: First tile of 2048; play continues
//! - **Game Over**: Board full and no equal neighbours
//!
//! # Example
//!
//! ```
//! use tile_merge_core::GameState;
//! use tile_merge_types::{Direction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.new_game();
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Timestamps are milliseconds from any fixed origin.
//! let mut now = 0;
//! for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     let result = game.apply_move(dir, now);
//!     if result.moved {
//!         assert!(result.spawned.is_some());
//!     }
//!     now += 250;
//! }
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.score, game.score());
//! ```

pub mod config;
pub mod danger;
pub mod game_state;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod undo;

pub use tile_merge_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use danger::{classify, DangerThresholds};
pub use game_state::{GameState, MoveResult};
pub use grid::{Board, TileIds};
pub use resolver::{resolve_move, Merge, MoveOutcome, TileMotion};
pub use rng::{SimpleRng, SpawnScheduler};
pub use scoring::{ScoreEngine, ScoreResult, ScoreTuning};
pub use snapshot::GameSnapshot;
pub use undo::{UndoManager, UndoSnapshot};
