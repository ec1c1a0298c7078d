//! Tile merge (workspace facade crate).
//!
//! Exposes the workspace crates under one stable path:
//! `tile_merge::{core, input, types}`. The implementation lives in dedicated
//! crates under `crates/`.

pub use tile_merge_core as core;
pub use tile_merge_input as input;
pub use tile_merge_types as types;
