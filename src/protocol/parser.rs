//! Line protocol command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use thiserror::Error;

use crate::board::{Cell, Quadrant};

/// Why a protocol line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty line")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("malformed {command}: expected '{usage}'")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    #[error("unknown player: '{0}'")]
    UnknownPlayer(String),

    #[error("invalid cell: '{0}'")]
    InvalidCell(String),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Start a new game from the menu or the end screen.
    NewGame,

    /// The intro sequence has finished.
    Intro,

    /// Toggle a seat between human and AI: `human <player>`.
    Human(Quadrant),

    /// Leave setup and begin the first turn.
    Start,

    /// Roll the dice for the acting human.
    Roll,

    /// Select a landing cell: `select <cell>` or `select <x> <y>`.
    Select(Cell),

    /// Dismiss the round summary or the end screen.
    Continue,

    /// Advance the frame clock by the given milliseconds.
    Tick(u64),

    /// Print a JSON snapshot of the game.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines and unrecognized or malformed commands;
/// the latter are logged at debug level.
pub fn parse_command(line: &str) -> Option<Command> {
    match try_parse_command(line) {
        Ok(cmd) => Some(cmd),
        Err(CommandError::Empty) => None,
        Err(e) => {
            tracing::debug!(line, error = %e, "ignoring protocol line");
            None
        }
    }
}

/// Parses a single line of input, reporting why it was rejected.
pub fn try_parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Err(CommandError::Empty);
    };

    match head {
        "isready" => Ok(Command::IsReady),
        "newgame" => Ok(Command::NewGame),
        "intro" => Ok(Command::Intro),
        "start" => Ok(Command::Start),
        "roll" => Ok(Command::Roll),
        "continue" => Ok(Command::Continue),
        "state" => Ok(Command::State),
        "quit" => Ok(Command::Quit),

        "human" => parse_human(&tokens),
        "select" => parse_select(&tokens),
        "tick" => parse_tick(&tokens),

        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Parses `human <player>`, where the player is an element name or seat number.
fn parse_human(tokens: &[&str]) -> Result<Command, CommandError> {
    let [_, player] = tokens else {
        return Err(CommandError::Usage {
            command: "human",
            usage: "human <player>",
        });
    };
    Quadrant::from_name(player)
        .map(Command::Human)
        .ok_or_else(|| CommandError::UnknownPlayer(player.to_string()))
}

/// Parses `select <cell>` or `select <x> <y>`.
fn parse_select(tokens: &[&str]) -> Result<Command, CommandError> {
    let cell = match tokens {
        [_, id] => {
            let id = parse_number::<usize>(id)?;
            Cell::from_index(id)
        }
        [_, x, y] => {
            let x = parse_number::<u8>(x)?;
            let y = parse_number::<u8>(y)?;
            Cell::from_xy(x, y)
        }
        _ => {
            return Err(CommandError::Usage {
                command: "select",
                usage: "select <cell> | select <x> <y>",
            })
        }
    };
    cell.map(Command::Select)
        .ok_or_else(|| CommandError::InvalidCell(tokens[1..].join(" ")))
}

/// Parses `tick <ms>`.
fn parse_tick(tokens: &[&str]) -> Result<Command, CommandError> {
    let [_, ms] = tokens else {
        return Err(CommandError::Usage {
            command: "tick",
            usage: "tick <ms>",
        });
    };
    parse_number(ms).map(Command::Tick)
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Result<T, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        for (line, cmd) in [
            ("isready", Command::IsReady),
            ("newgame", Command::NewGame),
            ("intro", Command::Intro),
            ("start", Command::Start),
            ("roll", Command::Roll),
            ("continue", Command::Continue),
            ("state", Command::State),
            ("quit", Command::Quit),
        ] {
            assert_eq!(parse_command(line), Some(cmd));
        }
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(try_parse_command("\t"), Err(CommandError::Empty));
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
        assert_eq!(
            try_parse_command("foobar 1"),
            Err(CommandError::Unknown("foobar".to_string()))
        );
    }

    #[test]
    fn parse_human_by_name_and_seat() {
        assert_eq!(parse_command("human fire"), Some(Command::Human(Quadrant::Fire)));
        assert_eq!(parse_command("human 3"), Some(Command::Human(Quadrant::Air)));
        assert_eq!(
            try_parse_command("human narnia"),
            Err(CommandError::UnknownPlayer("narnia".to_string()))
        );
        assert!(matches!(
            try_parse_command("human"),
            Err(CommandError::Usage { command: "human", .. })
        ));
    }

    #[test]
    fn parse_select_by_id() {
        assert_eq!(parse_command("select 37"), Some(Command::Select(Cell::new(37))));
        assert_eq!(
            try_parse_command("select 256"),
            Err(CommandError::InvalidCell("256".to_string()))
        );
    }

    #[test]
    fn parse_select_by_coordinates() {
        assert_eq!(
            parse_command("select 5 2"),
            Some(Command::Select(Cell::new(37)))
        );
        assert_eq!(
            try_parse_command("select 16 0"),
            Err(CommandError::InvalidCell("16 0".to_string()))
        );
        assert_eq!(
            try_parse_command("select x 0"),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn parse_tick() {
        assert_eq!(parse_command("tick 250"), Some(Command::Tick(250)));
        assert_eq!(parse_command("tick"), None);
        assert_eq!(parse_command("tick -1"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_command("  roll \n"), Some(Command::Roll));
    }
}
