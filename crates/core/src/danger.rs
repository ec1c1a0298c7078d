//! Danger module - board-fullness risk level
//!
//! A pure function of the number of empty cells, with no memory between moves.

use serde::{Deserialize, Serialize};

use crate::grid::Board;
use crate::types::{DangerLevel, CRITICAL_MAX_EMPTY, IMMINENT_MAX_EMPTY, WARNING_MAX_EMPTY};

/// Inclusive upper bounds on the empty-cell count for each level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerThresholds {
    pub warning_max_empty: usize,
    pub critical_max_empty: usize,
    pub imminent_max_empty: usize,
}

impl Default for DangerThresholds {
    fn default() -> Self {
        Self {
            warning_max_empty: WARNING_MAX_EMPTY,
            critical_max_empty: CRITICAL_MAX_EMPTY,
            imminent_max_empty: IMMINENT_MAX_EMPTY,
        }
    }
}

/// Classify an empty-cell count
pub fn classify(empty_cells: usize, thresholds: &DangerThresholds) -> DangerLevel {
    if empty_cells <= thresholds.imminent_max_empty {
        DangerLevel::Imminent
    } else if empty_cells <= thresholds.critical_max_empty {
        DangerLevel::Critical
    } else if empty_cells <= thresholds.warning_max_empty {
        DangerLevel::Warning
    } else {
        DangerLevel::Safe
    }
}

pub fn classify_board(board: &Board, thresholds: &DangerThresholds) -> DangerLevel {
    classify(board.empty_cells().len(), thresholds)
}
