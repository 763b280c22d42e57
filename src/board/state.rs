//! Game clock.
//!
//! Tracks whose turn it is, the round counter, the cosmetic month/season
//! display, the deer-mode countdown, and how many players have finished.

use serde::{Deserialize, Serialize};

use super::cell::Quadrant;

/// Number of months before the month counter wraps back to 1.
pub const MONTHS_PER_YEAR: u8 = 12;

/// Months per season.
pub const MONTHS_PER_SEASON: u8 = 4;

/// The season shown on the HUD. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Returns the following season, wrapping after autumn.
    pub const fn next(self) -> Season {
        match self {
            Season::Winter => Season::Spring,
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
        }
    }

    /// Returns the season index `0..=3`.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Turn/round bookkeeping for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    pub turn: Quadrant,
    pub round: u32,
    pub month: u8,
    pub season: Season,
    pub deer_mode_active: bool,
    pub deer_mode_counter: i32,
    /// Only ever increases; four means the game is over.
    pub finished_players: u8,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Clock for the first round of a new game.
    pub fn new() -> Self {
        GameClock {
            turn: Quadrant::Water,
            round: 1,
            month: 0,
            season: Season::Winter,
            deer_mode_active: false,
            deer_mode_counter: 0,
            finished_players: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_first_round() {
        let clock = GameClock::new();
        assert_eq!(clock.turn, Quadrant::Water);
        assert_eq!(clock.round, 1);
        assert!(!clock.deer_mode_active);
        assert_eq!(clock.finished_players, 0);
    }

    #[test]
    fn seasons_wrap() {
        assert_eq!(Season::Autumn.next(), Season::Winter);
        assert_eq!(Season::Winter.next().index(), 1);
    }
}
