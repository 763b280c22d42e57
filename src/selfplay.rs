//! AI-only game simulation.
//!
//! Plays full games with every seat on the AI heuristic, driving the engine
//! purely through its public input API. Records per-round cash and token
//! counts plus the final results, for balance analysis of the board and
//! the card piles.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Cell, Quadrant, ALL_QUADRANTS, PLAYER_COUNT};
use crate::config::{ConfigError, GameConfig};
use crate::engine::Engine;
use crate::eval::GameResults;
use crate::event::{Input, Notification, Rejection, SoundEffect};
use crate::resolve::GamePhase;

/// Upper bound on engine ticks per game, far above any real game length.
const MAX_TICKS_PER_GAME: usize = 1_000_000;

/// Errors that stop a self-play run.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,

    #[error("invalid rules: {0}")]
    Config(#[from] ConfigError),

    #[error("game setup rejected: {0}")]
    Setup(#[from] Rejection),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Round cap; games still running afterwards are marked truncated.
    pub max_rounds: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Base seed; game `i` uses `seed + i`. 0 picks a fresh seed per game.
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
    /// Rules applied to every game. Seat and seed fields are overridden.
    pub rules: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_rounds: 500,
            threads: 4,
            seed: 0,
            quiet: false,
            rules: GameConfig::default(),
        }
    }
}

/// Board summary taken at the start of every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub cash: [u32; PLAYER_COUNT],
    pub positions: [Cell; PLAYER_COUNT],
    pub tokens_on_board: usize,
    pub deer_mode: bool,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Seed that reproduces this game.
    pub seed: u64,
    pub winner: Option<Quadrant>,
    pub final_round: u32,
    /// Number of dice rolled.
    pub rolls: usize,
    /// The round in which deer mode began, if it did.
    pub deer_mode_round: Option<u32>,
    /// True if the game hit the round cap before ending.
    pub truncated: bool,
    pub final_cash: [u32; PLAYER_COUNT],
    pub results: Option<GameResults>,
    pub rounds: Vec<RoundRecord>,
}

fn round_record(engine: &Engine) -> RoundRecord {
    let ctx = engine.context();
    RoundRecord {
        round: engine.clock().round,
        cash: ALL_QUADRANTS.map(|q| ctx.player(q).cash),
        positions: ALL_QUADRANTS.map(|q| ctx.player(q).position),
        tokens_on_board: ctx.diamonds.on_board_count(),
        deer_mode: engine.clock().deer_mode_active,
    }
}

/// Plays a single self-play game and returns the game record.
///
/// Fails before the first tick if the rules do not validate.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    seed: u64,
) -> Result<GameRecord, SelfPlayError> {
    let rules = GameConfig {
        seed: Some(seed),
        humans: [false; PLAYER_COUNT],
        ai_think_ms: 0,
        pause_between_rounds: false,
        ..config.rules.clone()
    };
    let mut engine = Engine::new(rules)?;
    engine.boot()?;
    for input in [
        Input::NewGameRequested,
        Input::IntroFinished,
        Input::StartGameRequested,
    ] {
        engine.handle(input)?;
    }

    let mut rounds = vec![round_record(&engine)];
    let mut rolls = 0;
    let mut deer_mode_round = None;
    let mut truncated = false;

    for _ in 0..MAX_TICKS_PER_GAME {
        if engine.phase() == GamePhase::EndGame {
            break;
        }
        if engine.clock().round > config.max_rounds {
            truncated = true;
            break;
        }
        let round = engine.clock().round;
        engine.update(Duration::ZERO);

        for note in engine.drain_notifications() {
            match note {
                Notification::Sound {
                    effect: SoundEffect::Dice,
                } => rolls += 1,
                Notification::Banner { text } if text == "deer mode" => {
                    deer_mode_round = Some(engine.clock().round);
                }
                _ => {}
            }
        }
        if engine.clock().round != round && engine.phase() != GamePhase::EndGame {
            rounds.push(round_record(&engine));
        }
    }

    if engine.phase() != GamePhase::EndGame && !truncated {
        tracing::warn!(game_id, "self-play game exceeded the tick limit");
        truncated = true;
    }

    let ctx = engine.context();
    let results = engine.results().cloned();
    Ok(GameRecord {
        game_id,
        seed,
        winner: results.as_ref().and_then(|r| r.winner),
        final_round: engine.clock().round,
        rolls,
        deer_mode_round,
        truncated,
        final_cash: ALL_QUADRANTS.map(|q| ctx.player(q).cash),
        results,
        rounds,
    })
}

fn game_seed(config: &SelfPlayConfig, game_id: usize) -> u64 {
    if config.seed != 0 {
        config.seed.wrapping_add(game_id as u64)
    } else {
        rand::random()
    }
}

fn log_game(game: &GameRecord, done: usize, total: usize, elapsed: Duration) {
    let outcome = match game.winner {
        Some(w) => format!("{w} wins"),
        None if game.truncated => "truncated".to_string(),
        None => "no winner".to_string(),
    };
    tracing::info!(
        "Game {}/{}: {} in round {} ({:.2}s)",
        done,
        total,
        outcome,
        game.final_round,
        elapsed.as_secs_f64()
    );
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon and
/// may arrive out of `game_id` order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    config.rules.validate()?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game)
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, game_seed(config, i))?;
        if !config.quiet {
            log_game(&game, i + 1, config.num_games, game_start.elapsed());
        }
        on_game(game);
    }
    Ok(())
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<Result<GameRecord, SelfPlayError>>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, game_seed(&config_clone, i));
                    match &game {
                        Ok(record) if !config_clone.quiet => {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            log_game(record, n, config_clone.num_games, game_start.elapsed());
                        }
                        Err(e) => tracing::error!(game_id = i, error = %e, "self-play game failed"),
                        Ok(_) => {}
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the calling thread and pass to callback.
    for game in rx {
        on_game(game?);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub truncated: usize,
    pub wins: [usize; PLAYER_COUNT],
    pub avg_rounds: f64,
    pub avg_winning_cash: f64,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Summary::default()
        };
        let mut total_rounds = 0u64;
        let mut winning_cash = 0u64;
        for game in games {
            total_rounds += u64::from(game.final_round);
            if game.truncated {
                summary.truncated += 1;
            }
            if let Some(w) = game.winner {
                summary.wins[w.index()] += 1;
                winning_cash += u64::from(game.final_cash[w.index()]);
            }
        }
        let n = games.len().max(1) as f64;
        let won = summary.wins.iter().sum::<usize>().max(1) as f64;
        summary.avg_rounds = total_rounds as f64 / n;
        summary.avg_winning_cash = winning_cash as f64 / won;
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Truncated: {}", self.truncated)?;
        writeln!(f, "Avg rounds/game: {:.1}", self.avg_rounds)?;
        writeln!(f, "Avg winning cash: {:.1}", self.avg_winning_cash)?;
        writeln!(f, "Win distribution:")?;
        let total = self.games.max(1) as f64;
        for q in ALL_QUADRANTS {
            let wins = self.wins[q.index()];
            let pct = 100.0 * wins as f64 / total;
            writeln!(f, "  {:>6}: {} ({:.1}%)", q.name(), wins, pct)?;
        }
        Ok(())
    }
}
