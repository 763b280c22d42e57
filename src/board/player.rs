//! Per-player mutable state.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Quadrant};

/// Die face shown while a player has not rolled yet.
pub const DICE_WAITING: u8 = 6;

/// One player's record for the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub quadrant: Quadrant,
    pub cash: u32,
    pub food: u32,
    pub energy: u32,
    pub faith: u32,
    pub position: Cell,
    pub frozen_turns_left: u32,
    /// Set permanently once the player exits through the portal.
    pub done: bool,
    pub human: bool,
    pub reached_portal: bool,
    pub reached_portal_first: bool,
    /// True while it is this player's turn.
    pub active: bool,
    /// Holder of the strict cash lead; shown the big diamond.
    pub reach_portal_mode: bool,
    pub dice_result: u8,
    /// Highlighted cells around the token while active.
    pub neighbors: Vec<Cell>,
}

impl PlayerState {
    /// Creates a fresh player on its start cell.
    pub fn new(quadrant: Quadrant, start: Cell, human: bool) -> Self {
        PlayerState {
            quadrant,
            cash: 0,
            food: 0,
            energy: 0,
            faith: 0,
            position: start,
            frozen_turns_left: 0,
            done: false,
            human,
            reached_portal: false,
            reached_portal_first: false,
            active: false,
            reach_portal_mode: false,
            dice_result: DICE_WAITING,
            neighbors: Vec::new(),
        }
    }

    /// Adds one skipped turn. The only way the frozen counter grows.
    pub fn freeze(&mut self) {
        self.frozen_turns_left += 1;
    }

    /// Uses up one frozen turn. Returns false if the player was not frozen.
    pub fn consume_frozen_turn(&mut self) -> bool {
        if self.frozen_turns_left == 0 {
            return false;
        }
        self.frozen_turns_left -= 1;
        true
    }

    /// Marks the player as having exited through the portal.
    pub fn finish(&mut self, first: bool) {
        self.done = true;
        self.reached_portal = true;
        self.reached_portal_first = first;
        self.active = false;
    }
}
