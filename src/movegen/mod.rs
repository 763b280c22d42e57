//! Legal destination generation.
//!
//! Given a start cell and a die roll, walks the board graph in both
//! directions to find the two candidate landing cells.

use serde::{Deserialize, Serialize};

use crate::board::{BoardTopology, Cell, Direction, Edge};

/// A roll of this many pips has no valid arc on the board.
pub const BLOCKED_ROLL: u8 = 7;

/// The landing cell in each direction, or None when that direction is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Destinations {
    pub left: Option<Cell>,
    pub right: Option<Cell>,
}

impl Destinations {
    /// No legal move in either direction.
    pub const NONE: Destinations = Destinations {
        left: None,
        right: None,
    };

    /// Returns true if `cell` is one of the two destinations.
    pub fn contains(&self, cell: Cell) -> bool {
        self.left == Some(cell) || self.right == Some(cell)
    }

    /// Returns true if neither direction is legal.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Computes both destinations for moving `steps` cells from `start`.
///
/// Each direction is walked independently. An off-board edge makes that
/// direction illegal; a seam stops the walk on the last cell reached. The
/// two destinations may coincide.
pub fn compute_destinations(topology: &BoardTopology, start: Cell, steps: u8) -> Destinations {
    if steps == 0 || steps == BLOCKED_ROLL {
        return Destinations::NONE;
    }
    Destinations {
        left: walk(topology, start, steps, Direction::Left),
        right: walk(topology, start, steps, Direction::Right),
    }
}

fn walk(topology: &BoardTopology, start: Cell, steps: u8, direction: Direction) -> Option<Cell> {
    let mut cell = start;
    for _ in 0..steps {
        match topology.neighbor_in_direction(cell, direction) {
            Edge::Cell(next) => cell = next,
            Edge::Seam => break,
            Edge::OffBoard => return None,
        }
    }
    Some(cell)
}
