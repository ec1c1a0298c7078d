//! Score engine and danger classification tests

use tile_merge::core::scoring::triggers_fever;
use tile_merge::core::{classify, DangerThresholds, ScoreEngine, ScoreTuning};
use tile_merge::types::DangerLevel;

#[test]
fn test_combo_builds_inside_the_window() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());

    for (i, now) in [0u64, 1000, 2000, 2999].into_iter().enumerate() {
        engine.expire(now);
        let result = engine.record_move(8, now);
        assert_eq!(result.combo_count, i as u32 + 1);
    }
    assert_eq!(engine.combo_deadline_ms(), Some(2999 + 1500));
}

#[test]
fn test_combo_expires_at_the_deadline() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());
    engine.record_move(4, 0);

    assert!(!engine.expire(1499).combo_reset);
    assert_eq!(engine.combo_count(), 1);

    assert!(engine.expire(1500).combo_reset);
    assert_eq!(engine.combo_count(), 0);
}

#[test]
fn test_zero_score_move_leaves_combo_alone() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());
    engine.record_move(4, 0);

    let result = engine.record_move(0, 100);

    assert!(!result.combo_changed);
    assert_eq!(engine.combo_count(), 1);
    assert_eq!(engine.combo_deadline_ms(), Some(1500));
}

#[test]
fn test_fever_starts_on_fifth_combo_and_doubles_later_moves() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());

    for i in 0..4u64 {
        engine.expire(i * 100);
        let r = engine.record_move(10, i * 100);
        assert!(!r.fever_activated);
        assert_eq!(r.applied, 10);
    }

    engine.expire(400);
    let fifth = engine.record_move(10, 400);
    assert!(fifth.fever_activated);
    assert_eq!(fifth.applied, 10);
    assert_eq!(engine.multiplier(), 2);

    engine.expire(500);
    let sixth = engine.record_move(10, 500);
    assert!(!sixth.fever_activated);
    assert_eq!(sixth.multiplier, 2);
    assert_eq!(sixth.applied, 20);
    assert_eq!(engine.score(), 70);
}

#[test]
fn test_fever_ends_after_timeout() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());
    for i in 0..5u64 {
        engine.expire(i * 100);
        engine.record_move(4, i * 100);
    }
    assert!(engine.fever_active());
    assert_eq!(engine.fever_deadline_ms(), Some(400 + 2000));

    let expiry = engine.expire(2400);
    assert!(expiry.fever_ended);
    assert!(expiry.combo_reset);
    assert!(!engine.fever_active());
    assert_eq!(engine.multiplier(), 1);
}

#[test]
fn test_fever_does_not_retrigger_while_active() {
    assert!(triggers_fever(5, 5, false));
    assert!(triggers_fever(7, 5, false));
    assert!(!triggers_fever(6, 5, true));
    assert!(!triggers_fever(4, 5, false));
}

#[test]
fn test_best_score_tracks_and_survives_reset() {
    let mut engine = ScoreEngine::new(ScoreTuning::default());
    engine.set_best_score(50);

    assert!(!engine.record_move(32, 0).new_best);
    assert!(engine.record_move(32, 100).new_best);
    assert_eq!(engine.best_score(), 64);

    engine.reset();
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.best_score(), 64);

    engine.set_best_score(10);
    assert_eq!(engine.best_score(), 64);
}

#[test]
fn test_danger_levels_by_empty_cells() {
    let t = DangerThresholds::default();
    let expected = [
        (0, DangerLevel::Imminent),
        (1, DangerLevel::Imminent),
        (2, DangerLevel::Critical),
        (3, DangerLevel::Warning),
        (4, DangerLevel::Warning),
        (5, DangerLevel::Safe),
        (16, DangerLevel::Safe),
    ];
    for (empty, level) in expected {
        assert_eq!(classify(empty, &t), level, "{} empty cells", empty);
    }
    assert!(DangerLevel::Imminent > DangerLevel::Critical);
}
