//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Kept apart from
//! the core so the engine itself never depends on a terminal library.

pub mod map;

pub use tile_merge_types as types;

pub use map::{handle_key_event, should_quit};
