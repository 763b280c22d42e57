//! Self-play game generation CLI.
//!
//! Plays AI-only DeerPortal games and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use deerportal::config::GameConfig;
use deerportal::error::DeerPortalError;
use deerportal::selfplay::{self, SelfPlayConfig, Summary};

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Play AI-only DeerPortal games")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Number of parallel threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Base random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Round cap before a game is marked truncated.
    #[arg(long, default_value_t = 500)]
    max_rounds: u32,

    /// JSON rules configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output file path (default: stdout).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Suppress progress and summary output.
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    deerportal::init_tracing("info");
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("selfplay: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run(args: Args) -> Result<(), DeerPortalError> {
    let rules = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let config = SelfPlayConfig {
        num_games: args.games,
        max_rounds: args.max_rounds,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
        rules,
    };

    if !config.quiet {
        tracing::info!(
            games = config.num_games,
            threads = config.threads,
            max_rounds = config.max_rounds,
            seed = config.seed,
            "self-play starting"
        );
    }

    let start = Instant::now();
    let mut games = selfplay::run_self_play(&config)?;
    games.sort_by_key(|g| g.game_id);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/s)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
        eprint!("{}", Summary::from_games(&games));
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !config.quiet {
                eprintln!("Wrote {} games to {}", games.len(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}
