//! DeerPortal -- the turn engine behind a headless line protocol.
//!
//! This binary reads commands from stdin and writes notifications and state
//! snapshots to stdout. With `--test` it initializes a full game and exits.

use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use deerportal::config::GameConfig;
use deerportal::engine::Engine;
use deerportal::error::DeerPortalError;
use deerportal::event::Input;
use deerportal::protocol::{parse_command, Command, Snapshot};

#[derive(Debug, Parser)]
#[command(name = "deerportal", version, about = "DeerPortal turn engine")]
struct Cli {
    /// Initialize a game and exit immediately.
    #[arg(short = 't', long)]
    test: bool,

    /// JSON game configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// PRNG seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    deerportal::init_tracing("warn");
    let cli = Cli::parse();

    let result = panic::catch_unwind(AssertUnwindSafe(|| run(&cli)))
        .unwrap_or_else(|payload| Err(DeerPortalError::from_panic(payload)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.exit_code(), "{e}");
            eprintln!("deerportal: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run(cli: &Cli) -> Result<(), DeerPortalError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mut engine = Engine::new(config)?;
    engine.boot().map_err(game_error)?;

    if cli.test {
        return smoke_test(&mut engine);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    run_protocol(&mut engine, stdin.lock(), &mut out)
}

fn game_error(e: impl std::fmt::Display) -> DeerPortalError {
    DeerPortalError::Game(e.to_string())
}

/// Runs full initialization through to the first turn.
fn smoke_test(engine: &mut Engine) -> Result<(), DeerPortalError> {
    for input in [
        Input::NewGameRequested,
        Input::IntroFinished,
        Input::StartGameRequested,
    ] {
        engine.handle(input).map_err(game_error)?;
    }
    tracing::info!(phase = %engine.phase(), "smoke test passed");
    Ok(())
}

/// Runs the main protocol loop until `quit` or end of input.
fn run_protocol<R: BufRead, W: Write>(
    engine: &mut Engine,
    reader: R,
    out: &mut W,
) -> Result<(), DeerPortalError> {
    write_events(engine, out)?;

    for line in reader.lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let input = match cmd {
            Command::IsReady => {
                writeln!(out, "readyok")?;
                out.flush()?;
                continue;
            }
            Command::State => {
                writeln!(out, "state {}", Snapshot::capture(engine).to_json()?)?;
                out.flush()?;
                continue;
            }
            Command::Quit => break,
            Command::NewGame => Input::NewGameRequested,
            Command::Intro => Input::IntroFinished,
            Command::Human(quadrant) => Input::HumanToggleRequested(quadrant),
            Command::Start => Input::StartGameRequested,
            Command::Roll => Input::DiceRollRequested,
            Command::Select(cell) => Input::CellSelected(cell),
            Command::Continue => Input::Continue,
            Command::Tick(ms) => Input::Tick(Duration::from_millis(ms)),
        };

        if let Err(rejection) = engine.handle(input) {
            writeln!(out, "ignored {rejection}")?;
        }
        write_events(engine, out)?;
    }
    Ok(())
}

fn write_events<W: Write>(engine: &mut Engine, out: &mut W) -> Result<(), DeerPortalError> {
    for note in engine.drain_notifications() {
        writeln!(out, "event {}", serde_json::to_string(&note)?)?;
    }
    out.flush()?;
    Ok(())
}
