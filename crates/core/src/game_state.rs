//! Game state module - manages one game session
//!
//! This module ties together all core components: grid, resolver, spawner,
//! scoring, undo and danger classification. It owns the session lifecycle:
//!
//! ```text
//! Idle --new_game--> Playing --first tile >= win value--> Won (keeps playing)
//!                       |                                   |
//!                       +-------- board stuck --------------+--> GameOver
//! ```
//!
//! Every call resolves completely before returning. Combo and fever timers are
//! advanced by the `now_ms` timestamp the caller passes in; the engine never reads
//! a clock or schedules anything on its own.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::danger::classify_board;
use crate::grid::{Board, TileIds};
use crate::resolver::{self, Merge, TileMotion};
use crate::rng::SpawnScheduler;
use crate::scoring::ScoreEngine;
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::undo::UndoManager;

/// Everything one `apply_move` call did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveResult {
    /// False for no-op and rejected moves; nothing else in the session changed then
    /// (apart from expired combo/fever timers, reported in `events`).
    pub moved: bool,
    /// Score actually added, after the fever multiplier
    pub score_delta: u64,
    /// Merge total before multipliers
    pub raw_score_delta: u64,
    pub merged_values: ArrayVec<u32, MAX_MERGES_PER_MOVE>,
    pub merges: ArrayVec<Merge, MAX_MERGES_PER_MOVE>,
    pub motions: ArrayVec<TileMotion, CELL_COUNT>,
    pub spawned: Option<Tile>,
    pub events: Vec<GameEvent>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    ids: TileIds,
    spawner: SpawnScheduler,
    scoring: ScoreEngine,
    undo: UndoManager,
    status: GameStatus,
    /// Sticky once the win value has been reached this game.
    has_won: bool,
    danger: DangerLevel,
    /// Milestones already announced this game, one bit per power of two.
    milestones_seen: u64,
    /// Monotonic game counter (increments on every new game).
    episode_id: u32,
    /// Successful moves this game (undo takes one back).
    move_count: u32,
}

impl GameState {
    /// Create an idle session with the default tuning
    pub fn new(seed: u32) -> Self {
        Self::build(seed, EngineConfig::default())
    }

    /// Create an idle session with custom tuning
    pub fn with_config(seed: u32, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config))
    }

    fn build(seed: u32, config: EngineConfig) -> Self {
        let spawner = SpawnScheduler::new(seed, config.spawn_four_permille);
        let scoring = ScoreEngine::new(config.score_tuning());
        let undo = UndoManager::new(config.undo_limit);
        let board = Board::new();
        let danger = classify_board(&board, &config.danger);

        Self {
            config,
            board,
            ids: TileIds::new(),
            spawner,
            scoring,
            undo,
            status: GameStatus::Idle,
            has_won: false,
            danger,
            milestones_seen: 0,
            episode_id: 0,
            move_count: 0,
        }
    }

    /// Reset the session, place two tiles and start playing.
    ///
    /// Keeps the best score, the RNG stream and the tile id counter.
    pub fn new_game(&mut self) -> GameSnapshot {
        self.reset_session();
        self.spawner.refill_queue();
        for _ in 0..2 {
            self.spawner.spawn(&mut self.board, &mut self.ids);
        }
        self.danger = classify_board(&self.board, &self.config.danger);
        self.status = GameStatus::Playing;

        info!(episode = self.episode_id, seed = self.spawner.seed(), "new game");
        self.snapshot()
    }

    /// Start a game from a prepared position instead of two random tiles.
    ///
    /// Milestones and the win flag already satisfied by `board` are taken as
    /// reached without emitting events; a stuck board goes straight to `GameOver`.
    pub fn load_board(&mut self, board: Board) -> GameSnapshot {
        self.reset_session();
        if let Some(max_id) = board.tiles().iter().map(|t| t.id).max() {
            self.ids.reserve_through(max_id);
        }
        for tile in board.tiles() {
            if self.config.is_milestone(tile.value) {
                self.milestones_seen |= milestone_bit(tile.value);
            }
        }
        self.board = board;
        self.has_won = self.board.max_value() >= self.config.win_value;
        self.status = if self.has_won {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };
        self.danger = classify_board(&self.board, &self.config.danger);
        if self.is_stuck() {
            self.status = GameStatus::GameOver;
        }

        info!(episode = self.episode_id, tiles = self.board.len(), "loaded board");
        self.snapshot()
    }

    fn reset_session(&mut self) {
        self.board = Board::new();
        self.scoring.reset();
        self.undo.reset();
        self.has_won = false;
        self.milestones_seen = 0;
        self.move_count = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
    }

    /// Expire combo/fever timers against `now_ms`.
    ///
    /// Called at the start of every move; callers may also call it from a periodic
    /// tick so the UI sees fever end without waiting for the next move.
    pub fn tick(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.status.accepts_moves() {
            return events;
        }

        let expiry = self.scoring.expire(now_ms);
        if expiry.combo_reset {
            events.push(GameEvent::ComboChange { count: 0 });
        }
        if expiry.fever_ended {
            info!(now_ms, "fever ended");
            events.push(GameEvent::FeverChange { active: false });
        }
        events
    }

    /// Slide every tile toward `direction`, score, spawn and re-evaluate the session.
    ///
    /// Rejected while idle or after game over. A move that leaves the board layout
    /// unchanged is a no-op: no score, no spawn, no undo snapshot.
    pub fn apply_move(&mut self, direction: Direction, now_ms: u64) -> MoveResult {
        if !self.status.accepts_moves() {
            trace!(
                direction = direction.as_str(),
                status = self.status.as_str(),
                "move rejected"
            );
            return MoveResult::default();
        }

        let mut events = self.tick(now_ms);

        let outcome = resolver::resolve_move(&self.board, direction, &mut self.ids);
        if !outcome.moved {
            trace!(direction = direction.as_str(), "move changed nothing");
            return MoveResult {
                events,
                ..MoveResult::default()
            };
        }

        self.undo.capture(&self.board, self.scoring.score());

        let score = self.scoring.record_move(outcome.raw_score, now_ms);
        let merged_values = outcome.merged_values();
        for &value in &merged_values {
            events.push(GameEvent::Merge { value });
            self.note_milestone(value, &mut events);
        }
        if score.combo_changed {
            events.push(GameEvent::ComboChange {
                count: score.combo_count,
            });
        }
        if score.fever_activated {
            info!(combo = score.combo_count, "fever started");
            events.push(GameEvent::FeverChange { active: true });
        }
        if score.new_best {
            events.push(GameEvent::NewBestScore {
                score: self.scoring.best_score(),
            });
        }

        self.board = outcome.board;
        let spawned = self.spawner.spawn(&mut self.board, &mut self.ids);
        self.move_count += 1;
        self.danger = classify_board(&self.board, &self.config.danger);
        self.evaluate_terminal(&mut events);

        debug!(
            direction = direction.as_str(),
            raw = score.raw,
            applied = score.applied,
            merges = merged_values.len(),
            danger = self.danger.as_str(),
            "move resolved"
        );

        MoveResult {
            moved: true,
            score_delta: score.applied,
            raw_score_delta: score.raw,
            merged_values,
            merges: outcome.merges,
            motions: outcome.motions,
            spawned,
            events,
        }
    }

    /// Restore the board and score from before the last successful move.
    ///
    /// Allowed once per game (see `EngineConfig::undo_limit`); returns false when
    /// there is nothing to restore, the uses are spent or the game is over.
    ///
    /// Only tiles, score and the move counter go back. The spawn queue stays
    /// where it is: the tile spawned by the undone move was consumed from it, so
    /// repeating that move spawns the next queued value, which `next_values`
    /// already shows. Combo/fever timers and the best score are not rewound.
    pub fn undo(&mut self) -> bool {
        if !self.status.accepts_moves() {
            trace!(status = self.status.as_str(), "undo rejected");
            return false;
        }
        let Some(snapshot) = self.undo.take() else {
            trace!("nothing to undo");
            return false;
        };

        self.board = snapshot.board;
        self.scoring.restore_score(snapshot.score);
        self.move_count = self.move_count.saturating_sub(1);
        self.danger = classify_board(&self.board, &self.config.danger);

        debug!(score = snapshot.score, "undo applied");
        true
    }

    fn note_milestone(&mut self, value: u32, events: &mut Vec<GameEvent>) {
        if !self.config.is_milestone(value) {
            return;
        }
        let bit = milestone_bit(value);
        if self.milestones_seen & bit == 0 {
            self.milestones_seen |= bit;
            events.push(GameEvent::MilestoneReached { value });
        }
    }

    fn evaluate_terminal(&mut self, events: &mut Vec<GameEvent>) {
        if !self.has_won && self.board.max_value() >= self.config.win_value {
            self.has_won = true;
            self.status = GameStatus::Won;
            info!(score = self.scoring.score(), moves = self.move_count, "won");
            events.push(GameEvent::Win);
        }

        if self.is_stuck() {
            self.status = GameStatus::GameOver;
            let highest_tile = self.board.max_value();
            info!(
                score = self.scoring.score(),
                highest_tile,
                moves = self.move_count,
                "game over"
            );
            events.push(GameEvent::GameOver {
                final_score: self.scoring.score(),
                highest_tile,
            });
        }
    }

    fn is_stuck(&self) -> bool {
        self.board.is_full() && !self.board.has_adjacent_pair()
    }

    /// Whether a move in `direction` would change the board
    pub fn can_move(&self, direction: Direction) -> bool {
        self.status.accepts_moves() && resolver::can_move(&self.board, direction)
    }

    /// Directions that would change the board, in `Direction::ALL` order
    pub fn available_moves(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    /// Seed the best score from persisted storage. Never lowers it.
    pub fn set_best_score(&mut self, best: u64) {
        self.scoring.set_best_score(best);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    pub fn best_score(&self) -> u64 {
        self.scoring.best_score()
    }

    pub fn danger(&self) -> DangerLevel {
        self.danger
    }

    pub fn combo_count(&self) -> u32 {
        self.scoring.combo_count()
    }

    pub fn fever_active(&self) -> bool {
        self.scoring.fever_active()
    }

    pub fn fever_multiplier(&self) -> u32 {
        self.scoring.multiplier()
    }

    pub fn next_values(&self) -> [u32; LOOKAHEAD_LEN] {
        self.spawner.lookahead()
    }

    pub fn can_undo(&self) -> bool {
        self.status.accepts_moves() && self.undo.can_undo()
    }

    pub fn undo_consumed(&self) -> bool {
        self.undo.consumed()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn highest_tile(&self) -> u32 {
        self.board.max_value()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clear();
        out.tiles.extend_from_slice(self.board.tiles());
        out.grid = self.board.value_grid();
        out.score = self.scoring.score();
        out.best_score = self.scoring.best_score();
        out.status = self.status;
        out.has_won = self.has_won;
        out.danger = self.danger;
        out.combo_count = self.scoring.combo_count();
        out.fever_active = self.scoring.fever_active();
        out.fever_multiplier = self.scoring.multiplier();
        out.next_values = self.spawner.lookahead();
        out.can_undo = self.can_undo();
        out.episode_id = self.episode_id;
        out.move_count = self.move_count;
        out.highest_tile = self.board.max_value();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn milestone_bit(value: u32) -> u64 {
    1u64 << value.trailing_zeros()
}
