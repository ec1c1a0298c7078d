//! Scoring module - base score, combo streaks and fever multiplier
//!
//! Rules:
//! - Base score accumulates the raw merge delta of every successful move.
//! - A move with a positive raw delta extends the combo and pushes the combo
//!   deadline to `now + combo_window`. Missing the deadline resets the combo to 0.
//! - When the combo reaches the fever threshold while fever is off, fever turns on.
//!   Fever multiplies the *applied* score of every later scoring move and ends once
//!   `fever_timeout` passes without a scoring move.
//! - The multiplier for a move is decided before that move extends the combo, so the
//!   move that triggers fever is still scored at 1x.
//!
//! Time is never read from a clock here. Callers pass `now_ms`; expiry is checked
//! lazily on each move or on an explicit [`ScoreEngine::expire`] tick.

use serde::{Deserialize, Serialize};

use crate::types::{COMBO_WINDOW_MS, FEVER_COMBO_THRESHOLD, FEVER_MULTIPLIER, FEVER_TIMEOUT_MS};

/// Timing and multiplier knobs for the score engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTuning {
    pub combo_window_ms: u64,
    pub fever_combo_threshold: u32,
    pub fever_multiplier: u32,
    pub fever_timeout_ms: u64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            combo_window_ms: COMBO_WINDOW_MS,
            fever_combo_threshold: FEVER_COMBO_THRESHOLD,
            fever_multiplier: FEVER_MULTIPLIER,
            fever_timeout_ms: FEVER_TIMEOUT_MS,
        }
    }
}

/// Score calculation result for one successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Merge delta straight from the resolver.
    pub raw: u64,
    /// Delta actually added to the score (raw times multiplier).
    pub applied: u64,
    pub multiplier: u32,
    /// Combo count after this move.
    pub combo_count: u32,
    pub combo_changed: bool,
    /// Fever switched on by this move.
    pub fever_activated: bool,
    /// Best score moved because of this move.
    pub new_best: bool,
}

/// Timers that ran out during an expiry check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expiry {
    pub combo_reset: bool,
    pub fever_ended: bool,
}

/// Apply a multiplier to a raw delta
pub fn apply_multiplier(raw: u64, multiplier: u32) -> u64 {
    raw.saturating_mul(multiplier as u64)
}

/// Whether a combo of `combo_count` switches fever on
pub fn triggers_fever(combo_count: u32, threshold: u32, fever_active: bool) -> bool {
    !fever_active && combo_count >= threshold
}

/// Score accumulator with combo/fever state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEngine {
    tuning: ScoreTuning,
    score: u64,
    best_score: u64,
    combo_count: u32,
    combo_deadline_ms: Option<u64>,
    fever_active: bool,
    fever_deadline_ms: Option<u64>,
}

impl ScoreEngine {
    pub fn new(tuning: ScoreTuning) -> Self {
        Self {
            tuning,
            score: 0,
            best_score: 0,
            combo_count: 0,
            combo_deadline_ms: None,
            fever_active: false,
            fever_deadline_ms: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn combo_deadline_ms(&self) -> Option<u64> {
        self.combo_deadline_ms
    }

    pub fn fever_active(&self) -> bool {
        self.fever_active
    }

    pub fn fever_deadline_ms(&self) -> Option<u64> {
        self.fever_deadline_ms
    }

    /// Multiplier the next scoring move would get
    pub fn multiplier(&self) -> u32 {
        if self.fever_active {
            self.tuning.fever_multiplier
        } else {
            1
        }
    }

    /// Reset per-game state; the best score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo_count = 0;
        self.combo_deadline_ms = None;
        self.fever_active = false;
        self.fever_deadline_ms = None;
    }

    /// Raise the best score (e.g. from persisted storage). Never lowers it.
    pub fn set_best_score(&mut self, best: u64) {
        self.best_score = self.best_score.max(best);
    }

    /// Put the score back to an earlier value (undo). Best score is left alone.
    pub fn restore_score(&mut self, score: u64) {
        self.score = score;
    }

    /// Run out any timers whose deadline is at or before `now_ms`
    pub fn expire(&mut self, now_ms: u64) -> Expiry {
        let mut expiry = Expiry::default();

        if let Some(deadline) = self.combo_deadline_ms {
            if now_ms >= deadline {
                self.combo_deadline_ms = None;
                if self.combo_count > 0 {
                    self.combo_count = 0;
                    expiry.combo_reset = true;
                }
            }
        }

        if self.fever_active {
            if let Some(deadline) = self.fever_deadline_ms {
                if now_ms >= deadline {
                    self.fever_active = false;
                    self.fever_deadline_ms = None;
                    expiry.fever_ended = true;
                }
            }
        }

        expiry
    }

    /// Account for one successful move with raw merge delta `raw`.
    ///
    /// Expects [`expire`](Self::expire) to have run for `now_ms` already.
    pub fn record_move(&mut self, raw: u64, now_ms: u64) -> ScoreResult {
        if raw == 0 {
            return ScoreResult {
                multiplier: self.multiplier(),
                combo_count: self.combo_count,
                ..ScoreResult::default()
            };
        }

        let multiplier = self.multiplier();
        let applied = apply_multiplier(raw, multiplier);

        self.combo_count += 1;
        self.combo_deadline_ms = Some(now_ms.saturating_add(self.tuning.combo_window_ms));

        let fever_activated = triggers_fever(
            self.combo_count,
            self.tuning.fever_combo_threshold,
            self.fever_active,
        );
        if fever_activated {
            self.fever_active = true;
        }
        if self.fever_active {
            self.fever_deadline_ms = Some(now_ms.saturating_add(self.tuning.fever_timeout_ms));
        }

        self.score = self.score.saturating_add(applied);
        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        ScoreResult {
            raw,
            applied,
            multiplier,
            combo_count: self.combo_count,
            combo_changed: true,
            fever_activated,
            new_best,
        }
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(ScoreTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_score_accumulates() {
        let mut engine = ScoreEngine::default();
        engine.record_move(4, 0);
        engine.record_move(8, 100);
        assert_eq!(engine.score(), 12);
        assert_eq!(engine.best_score(), 12);
    }

    #[test]
    fn test_non_scoring_move_leaves_combo() {
        let mut engine = ScoreEngine::default();
        engine.record_move(4, 0);

        let result = engine.record_move(0, 100);

        assert_eq!(result.applied, 0);
        assert!(!result.combo_changed);
        assert_eq!(engine.combo_count(), 1);
        assert_eq!(engine.combo_deadline_ms(), Some(1500));
    }

    #[test]
    fn test_combo_expires_after_window() {
        let mut engine = ScoreEngine::default();
        engine.record_move(4, 0);
        engine.record_move(4, 1000);
        assert_eq!(engine.combo_count(), 2);

        assert_eq!(engine.expire(2499), Expiry::default());
        assert_eq!(engine.combo_count(), 2);

        let expiry = engine.expire(2500);
        assert!(expiry.combo_reset);
        assert_eq!(engine.combo_count(), 0);
        assert_eq!(engine.combo_deadline_ms(), None);
    }

    #[test]
    fn test_fever_activates_at_threshold() {
        let mut engine = ScoreEngine::default();
        for i in 0..4u64 {
            let r = engine.record_move(4, i * 100);
            assert!(!r.fever_activated);
            assert_eq!(r.multiplier, 1);
        }

        let fifth = engine.record_move(4, 400);
        assert!(fifth.fever_activated);
        assert_eq!(fifth.applied, 4);
        assert!(engine.fever_active());

        let sixth = engine.record_move(8, 500);
        assert_eq!(sixth.multiplier, 2);
        assert_eq!(sixth.applied, 16);
        assert_eq!(engine.score(), 4 * 5 + 16);
    }

    #[test]
    fn test_fever_ends_after_timeout() {
        let mut engine = ScoreEngine::default();
        for i in 0..5u64 {
            engine.record_move(2, i * 100);
        }
        assert!(engine.fever_active());
        assert_eq!(engine.fever_deadline_ms(), Some(400 + 2000));

        // Combo window closes first; fever holds on a little longer.
        let first = engine.expire(1900);
        assert!(first.combo_reset);
        assert!(!first.fever_ended);
        assert!(engine.fever_active());

        let second = engine.expire(2400);
        assert!(second.fever_ended);
        assert!(!engine.fever_active());
        assert_eq!(engine.multiplier(), 1);
    }

    #[test]
    fn test_deadlines_saturate_at_end_of_time() {
        let mut engine = ScoreEngine::default();
        let late = u64::MAX - 10;
        for _ in 0..5 {
            engine.record_move(2, late);
        }

        assert_eq!(engine.combo_deadline_ms(), Some(u64::MAX));
        assert_eq!(engine.fever_deadline_ms(), Some(u64::MAX));
        assert!(engine.expire(u64::MAX).fever_ended);
    }

    #[test]
    fn test_scoring_move_extends_fever() {
        let mut engine = ScoreEngine::default();
        for i in 0..5u64 {
            engine.record_move(2, i * 100);
        }
        engine.expire(1500);
        engine.record_move(2, 1500);

        assert!(engine.fever_active());
        assert_eq!(engine.fever_deadline_ms(), Some(3500));
        assert!(!engine.expire(3000).fever_ended);
    }

    #[test]
    fn test_reset_keeps_best() {
        let mut engine = ScoreEngine::default();
        for i in 0..5u64 {
            engine.record_move(16, i * 10);
        }
        engine.reset();

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score(), 80);
        assert_eq!(engine.combo_count(), 0);
        assert!(!engine.fever_active());
    }

    #[test]
    fn test_restore_score_keeps_best() {
        let mut engine = ScoreEngine::default();
        engine.record_move(32, 0);
        engine.restore_score(0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score(), 32);

        let r = engine.record_move(4, 10);
        assert!(!r.new_best);
    }

    #[test]
    fn test_set_best_score_never_lowers() {
        let mut engine = ScoreEngine::default();
        engine.set_best_score(500);
        engine.set_best_score(100);
        assert_eq!(engine.best_score(), 500);
    }

    #[test]
    fn test_apply_multiplier() {
        assert_eq!(apply_multiplier(0, 2), 0);
        assert_eq!(apply_multiplier(12, 3), 36);
        assert_eq!(apply_multiplier(u64::MAX, 2), u64::MAX);
    }
}
