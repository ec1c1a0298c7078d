//! Undo module - single-slot rewind of the last successful move

use crate::grid::Board;
use crate::types::DEFAULT_UNDO_LIMIT;

/// Board and score as they were before a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub board: Board,
    pub score: u64,
}

/// Holds at most one snapshot; each capture overwrites the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoManager {
    snapshot: Option<UndoSnapshot>,
    used: u32,
    limit: u32,
}

impl UndoManager {
    pub fn new(limit: u32) -> Self {
        Self {
            snapshot: None,
            used: 0,
            limit,
        }
    }

    /// Record the pre-move state
    pub fn capture(&mut self, board: &Board, score: u64) {
        self.snapshot = Some(UndoSnapshot {
            board: board.clone(),
            score,
        });
    }

    /// Hand out the snapshot if one exists and uses remain; counts as a use.
    pub fn take(&mut self) -> Option<UndoSnapshot> {
        if self.consumed() {
            return None;
        }
        let snapshot = self.snapshot.take()?;
        self.used += 1;
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.consumed() && self.snapshot.is_some()
    }

    /// All undo uses for this session are spent
    pub fn consumed(&self) -> bool {
        self.used >= self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Forget the snapshot and restore every use (new game)
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.used = 0;
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}
