//! Phase sequencing logic.
//!
//! Determines the next screen/phase of a game and advances the round
//! clock.
//!
//! Phase flow:
//! - Init          -> Menu (boot)
//! - Menu          -> IntroShader (new game)
//! - IntroShader   -> SetupPlayers (intro finished)
//! - SetupPlayers  -> LetsBegin (start game)
//! - LetsBegin     -> RollDice (first player launched)
//! - RollDice      -> Game (dice rolled)
//! - Game          -> RollDice (next player launched)
//! - Game          -> GuiEndRound (round paused, when configured)
//! - GuiEndRound   -> RollDice (continue)
//! - any in-game   -> EndGame (all players finished or deer mode ran out)
//! - EndGame       -> IntroShader (new game) or Menu

use serde::{Deserialize, Serialize};

use crate::board::{GameClock, Quadrant, MONTHS_PER_SEASON, MONTHS_PER_YEAR};

/// The engine's top-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Init,
    Menu,
    IntroShader,
    SetupPlayers,
    LetsBegin,
    RollDice,
    Game,
    GuiEndRound,
    EndGame,
}

impl GamePhase {
    /// Returns true while a game is being played.
    pub const fn in_game(self) -> bool {
        matches!(
            self,
            GamePhase::LetsBegin | GamePhase::RollDice | GamePhase::Game | GamePhase::GuiEndRound
        )
    }

    /// Returns the phase name as used in logs and the line protocol.
    pub const fn name(self) -> &'static str {
        match self {
            GamePhase::Init => "init",
            GamePhase::Menu => "menu",
            GamePhase::IntroShader => "intro_shader",
            GamePhase::SetupPlayers => "setup_players",
            GamePhase::LetsBegin => "lets_begin",
            GamePhase::RollDice => "roll_dice",
            GamePhase::Game => "game",
            GamePhase::GuiEndRound => "gui_end_round",
            GamePhase::EndGame => "end_game",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that moves the engine from one phase to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Boot,
    NewGame,
    IntroFinished,
    StartGame,
    PlayerLaunched,
    DiceRolled,
    RoundPaused,
    GameEnded,
    ReturnToMenu,
}

/// Computes the phase reached by applying `trigger` in `from`.
///
/// Returns None if the trigger is not valid in that phase.
pub fn transition(from: GamePhase, trigger: Trigger) -> Option<GamePhase> {
    use GamePhase::*;
    let to = match (from, trigger) {
        (Init, Trigger::Boot) => Menu,
        (Menu | EndGame, Trigger::NewGame) => IntroShader,
        (IntroShader, Trigger::IntroFinished) => SetupPlayers,
        (SetupPlayers, Trigger::StartGame) => LetsBegin,
        (LetsBegin | RollDice | Game | GuiEndRound, Trigger::PlayerLaunched) => RollDice,
        (RollDice, Trigger::DiceRolled) => Game,
        (RollDice | Game, Trigger::RoundPaused) => GuiEndRound,
        (phase, Trigger::GameEnded) if phase.in_game() => EndGame,
        (EndGame, Trigger::ReturnToMenu) => Menu,
        _ => return None,
    };
    Some(to)
}

/// Advances the clock to the next round.
///
/// The turn returns to the first player, the month counts up and wraps
/// after twelve, and the season turns every fourth month.
pub fn next_round(clock: &mut GameClock) {
    clock.turn = Quadrant::Water;
    clock.round += 1;
    clock.month += 1;
    if clock.month > MONTHS_PER_YEAR {
        clock.month = 1;
    }
    if clock.month % MONTHS_PER_SEASON == 0 {
        clock.season = clock.season.next();
    }
}
