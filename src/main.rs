//! Terminal tile-merge runner (default binary).
//!
//! Drives one game session from the keyboard and prints the board as plain
//! text. Engine events are fanned out here; this is the single place where
//! collaborators (sound, achievements, persistence) would subscribe.
//!
//! Environment:
//! - `TILE_MERGE_CONFIG`: path to a TOML file with engine tunables
//! - `TILE_MERGE_SEED`: RNG seed (u32); defaults to the clock
//! - `TILE_MERGE_LOG`: tracing filter (default "warn"), written to stderr

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_merge::core::{EngineConfig, GameSnapshot, GameState, MoveResult};
use tile_merge::input::{handle_key_event, should_quit};
use tile_merge::types::{GameAction, GameEvent};

/// Idle poll interval; combo/fever expiry is checked at this rate between keys.
const TICK_MS: u64 = 100;

const HELP: &str = "arrows/WASD/HJKL move, u undo, r new game, q quit";

fn main() -> Result<()> {
    init_logging();

    let config = load_config()?;
    let seed = load_seed()?;
    let mut game = GameState::with_config(seed, config)?;
    game.new_game();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, &mut game);

    // Always try to restore terminal state.
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if result.is_ok() {
        println!("final score {} (best {})", game.score(), game.best_score());
    }
    result
}

fn init_logging() {
    let filter = std::env::var("TILE_MERGE_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config() -> Result<EngineConfig> {
    match std::env::var("TILE_MERGE_CONFIG") {
        Ok(path) => EngineConfig::from_toml_file(&path)
            .with_context(|| format!("loading engine config from {}", path)),
        Err(_) => Ok(EngineConfig::default()),
    }
}

fn load_seed() -> Result<u32> {
    match std::env::var("TILE_MERGE_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("TILE_MERGE_SEED must be a u32, got {:?}", raw)),
        Err(_) => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1)),
    }
}

fn run(out: &mut impl Write, game: &mut GameState) -> Result<()> {
    let started = Instant::now();
    let mut status_line = HELP.to_string();

    loop {
        draw(out, &game.snapshot(), &status_line)?;

        // Input with timeout until next tick. Each key is handled to completion
        // before the next one is read, so moves never overlap.
        let ready = event::poll(Duration::from_millis(TICK_MS))?;
        let now_ms = started.elapsed().as_millis() as u64;

        if !ready {
            fan_out(&game.tick(now_ms));
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if should_quit(key) {
            return Ok(());
        }

        match handle_key_event(key) {
            Some(GameAction::Move(direction)) => {
                let result = game.apply_move(direction, now_ms);
                status_line = describe_move(&result);
                fan_out(&result.events);
            }
            Some(GameAction::Undo) => {
                status_line = if game.undo() {
                    "move undone".to_string()
                } else {
                    "nothing to undo".to_string()
                };
            }
            Some(GameAction::NewGame) => {
                game.new_game();
                status_line = HELP.to_string();
            }
            None => {}
        }
    }
}

fn describe_move(result: &MoveResult) -> String {
    if !result.moved {
        return "can't move that way".to_string();
    }
    if result.score_delta > result.raw_score_delta {
        format!("+{} (fever x{})", result.score_delta, result.score_delta / result.raw_score_delta.max(1))
    } else if result.score_delta > 0 {
        format!("+{}", result.score_delta)
    } else {
        String::new()
    }
}

/// Hand engine events to collaborators. Here that is the log.
fn fan_out(events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::Win => info!("win tile reached"),
            GameEvent::GameOver {
                final_score,
                highest_tile,
            } => info!(final_score, highest_tile, "session finished"),
            GameEvent::NewBestScore { score } => info!(score, "best score to persist"),
            GameEvent::MilestoneReached { value } => info!(value, "milestone unlocked"),
            GameEvent::FeverChange { active } => info!(active, "fever"),
            other => debug!(event = ?other, "game event"),
        }
    }
}

fn draw(out: &mut impl Write, snap: &GameSnapshot, status_line: &str) -> Result<()> {
    let mut lines = Vec::with_capacity(16);

    lines.push(format!(
        "score {:>7}   best {:>7}   {}",
        snap.score,
        snap.best_score,
        snap.status.as_str()
    ));
    let fever = if snap.fever_active {
        format!("  FEVER x{}", snap.fever_multiplier)
    } else {
        String::new()
    };
    lines.push(format!(
        "combo {}{}   danger {}   next {:?}   undo {}",
        snap.combo_count,
        fever,
        snap.danger.as_str(),
        snap.next_values,
        if snap.can_undo { "ready" } else { "-" }
    ));
    lines.push(String::new());

    let rule = "+------+------+------+------+".to_string();
    lines.push(rule.clone());
    for row in &snap.grid {
        let cells: Vec<String> = row
            .iter()
            .map(|&v| {
                if v == 0 {
                    "      ".to_string()
                } else {
                    format!("{:^6}", v)
                }
            })
            .collect();
        lines.push(format!("|{}|", cells.join("|")));
        lines.push(rule.clone());
    }
    lines.push(String::new());
    if snap.playable() {
        lines.push(status_line.to_string());
    } else {
        lines.push("no moves left - press r for a new game".to_string());
    }

    queue!(out, terminal::Clear(ClearType::All))?;
    for (y, line) in lines.iter().enumerate() {
        queue!(out, cursor::MoveTo(0, y as u16), Print(line))?;
    }
    out.flush()?;
    Ok(())
}
