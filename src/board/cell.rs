//! Board cells and quadrants.
//!
//! The board is a 16x16 grid of 256 cells addressed by a single byte id.
//! Each cell belongs to one of four quadrants; each quadrant is home to one
//! player, one element, and one card pile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width (and height) of the square board.
pub const BOARD_WIDTH: u8 = 16;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = 256;

/// Number of players, quadrants, and card piles.
pub const PLAYER_COUNT: usize = 4;

/// A board cell, identified by its id `0..=255`.
///
/// The id maps to grid coordinates `(id % 16, id / 16)`. Every `u8` is a
/// valid cell, so a `Cell` can never be out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    /// Creates a cell from its id.
    pub const fn new(id: u8) -> Self {
        Cell(id)
    }

    /// Creates a cell from a table index, or None when the index is past the board.
    pub fn from_index(index: usize) -> Option<Cell> {
        u8::try_from(index).ok().map(Cell)
    }

    /// Creates a cell from grid coordinates, or None when either is off the grid.
    pub fn from_xy(x: u8, y: u8) -> Option<Cell> {
        if x >= BOARD_WIDTH || y >= BOARD_WIDTH {
            return None;
        }
        Some(Cell(y * BOARD_WIDTH + x))
    }

    /// Returns the raw cell id.
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Returns the cell id as an array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Column of the cell.
    pub const fn x(self) -> u8 {
        self.0 % BOARD_WIDTH
    }

    /// Row of the cell.
    pub const fn y(self) -> u8 {
        self.0 / BOARD_WIDTH
    }

    /// Returns the quadrant containing this cell.
    pub const fn quadrant(self) -> Quadrant {
        let half = BOARD_WIDTH / 2;
        match (self.x() < half, self.y() < half) {
            (true, true) => Quadrant::Water,
            (false, true) => Quadrant::Earth,
            (false, false) => Quadrant::Fire,
            (true, false) => Quadrant::Air,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four board regions. Quadrant `n` belongs to player `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Water,
    Earth,
    Fire,
    Air,
}

/// All quadrants in turn order.
pub const ALL_QUADRANTS: [Quadrant; PLAYER_COUNT] =
    [Quadrant::Water, Quadrant::Earth, Quadrant::Fire, Quadrant::Air];

impl Quadrant {
    /// Returns the player / pile index of this quadrant.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a quadrant by index.
    pub fn from_index(index: usize) -> Option<Quadrant> {
        ALL_QUADRANTS.get(index).copied()
    }

    /// Returns the lowercase element name.
    pub const fn name(self) -> &'static str {
        match self {
            Quadrant::Water => "water",
            Quadrant::Earth => "earth",
            Quadrant::Fire => "fire",
            Quadrant::Air => "air",
        }
    }

    /// Parses an element name or a seat number `0..=3`.
    pub fn from_name(s: &str) -> Option<Quadrant> {
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }
        ALL_QUADRANTS
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s))
    }

    /// Returns the next quadrant in turn order, wrapping after Air.
    pub const fn next(self) -> Quadrant {
        match self {
            Quadrant::Water => Quadrant::Earth,
            Quadrant::Earth => Quadrant::Fire,
            Quadrant::Fire => Quadrant::Air,
            Quadrant::Air => Quadrant::Water,
        }
    }

    /// Returns true for the last seat in the rotation.
    pub const fn is_last(self) -> bool {
        matches!(self, Quadrant::Air)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
