//! Messages crossing the engine boundary.
//!
//! The presentation layer feeds [`Input`] values into the engine and reads
//! back [`Notification`] values describing what to draw or play. Inputs that
//! are not legal right now come back as a [`Rejection`]; these are ordinary
//! during play and never abort the game.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::board::{Cell, GameClock, Quadrant};
use crate::eval::GameResults;
use crate::resolve::GamePhase;

/// Inbound events consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// New game from the menu, or restart after the end screen.
    NewGameRequested,
    /// The intro sequence has finished playing.
    IntroFinished,
    /// Flip a seat between human and AI during setup.
    HumanToggleRequested(Quadrant),
    /// Leave setup and begin the first turn.
    StartGameRequested,
    /// The acting human clicked the dice.
    DiceRollRequested,
    /// The acting human clicked a board cell.
    CellSelected(Cell),
    /// Dismiss the round summary or the end screen.
    Continue,
    /// Frame time elapsed; drives AI thinking timers.
    Tick(Duration),
}

/// Sound cues emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    Collect,
    Card,
    Portal,
    DeerMode,
    Meditation,
    Dice,
}

/// Outbound notifications for renderers and audio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Banner { text: String },
    Sound { effect: SoundEffect },
    MusicStopped,
    DiamondMoved { id: usize, cell: Cell },
    DiamondCollected { id: usize, cell: Cell },
    PlayerUpdated { player: Quadrant },
    StateChanged { phase: GamePhase },
    ClockChanged { clock: GameClock },
    EndGameResults { results: GameResults },
}

impl Notification {
    /// Shorthand for a banner notification.
    pub fn banner(text: impl Into<String>) -> Self {
        Notification::Banner { text: text.into() }
    }

    /// Shorthand for a sound notification.
    pub fn sound(effect: SoundEffect) -> Self {
        Notification::Sound { effect }
    }
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{input} is not accepted during {phase}")]
    WrongPhase {
        input: &'static str,
        phase: GamePhase,
    },

    #[error("it is {0}'s turn and that seat is played by the AI")]
    NotHumanTurn(Quadrant),

    #[error("cell {0} is not a legal destination")]
    InvalidMove(Cell),
}
