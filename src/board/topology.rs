//! Static board topology for the DeerPortal board.
//!
//! Every cell records the cell reached by one step in each traversal
//! direction. Each quadrant holds one serpentine arm running from the
//! player's start corner to the quadrant's portal; `Right` walks toward the
//! portal and `Left` walks back toward the start. Where an arm passes a
//! terrain cell the edge jumps over it. All data is compile-time `static`.
//!
//! Sentinels in the edge tables:
//! - `-1`: off-board / dead end, the step is illegal.
//! - `-2`: seam, the walker stops on the current cell.

use super::cell::{Cell, Quadrant, CELL_COUNT, PLAYER_COUNT};

/// Number of impassable terrain cells.
pub const TERRAIN_COUNT: usize = 24;

/// Number of cells per quadrant that may hold a diamond.
pub const CANDIDATES_PER_QUADRANT: usize = 39;

const OFF_BOARD: i16 = -1;
const SEAM: i16 = -2;

/// Start cell for each player, indexed by quadrant.
pub static START_CELLS: [u8; PLAYER_COUNT] = [0, 15, 255, 240];

/// Portal (exit) cell for each quadrant's arm.
pub static EXIT_CELLS: [u8; PLAYER_COUNT] = [112, 8, 143, 247];

/// Cell reached by stepping `Left` (back toward the start corner).
static LEFT: [i16; CELL_COUNT] = [
    -1, 0, 1, 2, 3, 4, 5, 6, 24, 10, 26, 12, 28, 14, 30, -1,
    17, 18, 21, -1, -1, 22, 23, 7, 40, 9, 42, 11, 44, 13, 46, 15,
    16, 32, 33, 34, 35, 36, 37, 38, 56, 25, 58, -1, 60, 29, 94, 31,
    49, 50, 51, 52, 54, -1, 55, 39, 72, -1, 74, 27, 76, 45, -1, 47,
    48, 64, -1, 65, 67, 68, 69, 70, 88, 41, 90, 59, 108, 61, -1, 63,
    81, 82, 83, 84, 85, 87, -1, 71, 104, 73, 122, 75, -1, 77, 110, 79,
    80, 96, 97, -1, 98, 100, 101, 102, 120, 89, -1, 91, 124, 93, 126, 95,
    113, 114, 115, 116, 117, 118, 119, 103, 121, 105, 123, 107, 125, 109, 127, 111,
    144, 128, 146, 130, 148, 132, 150, 134, 152, 136, 137, 138, 139, 140, 141, 142,
    160, 129, 162, 131, 164, -1, 166, 135, 153, 154, 155, 157, -1, 158, 159, 175,
    176, 145, 178, -1, 180, 133, 182, 151, 184, -1, 168, 170, 171, 172, 173, 174,
    192, -1, 194, 147, 196, 165, 214, 167, 185, 186, 187, 188, 190, -1, 191, 207,
    208, -1, 210, 179, 228, 181, -1, 183, 216, 200, -1, 201, 203, 204, 205, 206,
    224, 161, 226, 195, -1, 197, 230, 199, 217, 218, 219, 220, 221, 222, 223, 239,
    240, 209, 242, 211, 244, 213, 246, 215, 248, 232, 233, -1, -1, 234, 237, 238,
    -1, 225, 241, 227, 243, 229, 245, 231, 249, 250, 251, 252, 253, 254, 255, -1,
];

/// Cell reached by stepping `Right` (toward the portal).
static RIGHT: [i16; CELL_COUNT] = [
    1, 2, 3, 4, 5, 6, 7, 23, -2, 25, 9, 27, 11, 29, 13, 31,
    32, 16, 17, -1, -1, 18, 21, 22, 8, 41, 10, 59, 12, 45, 14, 47,
    33, 34, 35, 36, 37, 38, 39, 55, 24, 73, 26, -1, 28, 61, 30, 63,
    64, 48, 49, 50, 51, -1, 52, 54, 40, -1, 42, 75, 44, 77, -1, 79,
    65, 67, -1, 68, 69, 70, 71, 87, 56, 89, 58, 91, 60, 93, -1, 95,
    96, 80, 81, 82, 83, 84, -1, 85, 72, 105, 74, 107, -1, 109, 46, 111,
    97, 98, 100, -1, 101, 102, 103, 119, 88, 121, -1, 123, 76, 125, 94, 127,
    -2, 112, 113, 114, 115, 116, 117, 118, 104, 120, 90, 122, 108, 124, 110, 126,
    129, 145, 131, 147, 133, 165, 135, 151, 137, 138, 139, 140, 141, 142, 143, -2,
    128, 161, 130, 179, 132, -1, 134, 167, 136, 152, 153, 154, -1, 155, 157, 158,
    144, 209, 146, -1, 148, 181, 150, 183, 170, -1, 171, 172, 173, 174, 175, 159,
    160, -1, 162, 195, 164, 197, 166, 199, 168, 184, 185, 186, 187, -1, 188, 190,
    176, -1, 178, 211, 180, 213, -1, 215, 201, 203, -1, 204, 205, 206, 207, 191,
    192, 225, 194, 227, -1, 229, 182, 231, 200, 216, 217, 218, 219, 220, 221, 222,
    208, 241, 210, 243, 196, 245, 214, 247, 233, 234, 237, -1, -1, 238, 239, 223,
    224, 242, 226, 244, 228, 246, 230, -2, 232, 248, 249, 250, 251, 252, 253, 254,
];

/// Impassable river/rock cells, six per quadrant.
pub static TERRAIN: [u8; TERRAIN_COUNT] = [
    19, 20, 43, 53, 57, 62, 66, 78, 86, 92, 99, 106,
    149, 156, 163, 169, 177, 189, 193, 198, 202, 212, 235, 236,
];

/// Cells on which each quadrant's diamonds may be placed.
pub static DIAMOND_CANDIDATES: [[u8; CANDIDATES_PER_QUADRANT]; PLAYER_COUNT] = [
    // Water
    [
        3, 4, 5, 7, 23, 22, 18, 17, 16, 33, 34, 35, 37,
        38, 39, 54, 52, 51, 49, 48, 64, 67, 68, 69, 71, 87,
        85, 83, 82, 81, 96, 97, 98, 101, 102, 103, 118, 117, 116,
    ],
    // Earth
    [
        63, 79, 95, 127, 126, 110, 46, 30, 14, 29, 45, 61, 93,
        109, 125, 108, 76, 60, 28, 12, 11, 59, 75, 91, 123, 122,
        90, 58, 42, 26, 9, 25, 41, 89, 105, 121, 104, 88, 72,
    ],
    // Fire
    [
        252, 251, 250, 248, 232, 233, 237, 238, 239, 222, 221, 220, 218,
        217, 216, 201, 203, 204, 206, 207, 191, 188, 187, 186, 184, 168,
        170, 172, 173, 174, 159, 158, 157, 154, 153, 152, 137, 138, 139,
    ],
    // Air
    [
        192, 176, 160, 128, 129, 145, 209, 225, 241, 226, 210, 194, 162,
        146, 130, 147, 179, 195, 227, 243, 244, 196, 180, 164, 132, 133,
        165, 197, 213, 229, 246, 230, 214, 166, 150, 134, 151, 167, 183,
    ],
];

/// Direction of travel along an arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// Result of a single step lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The step lands on this cell.
    Cell(Cell),
    /// No cell in this direction; moving here is illegal.
    OffBoard,
    /// Seam marker; the walker keeps its current cell.
    Seam,
}

fn decode(raw: i16) -> Edge {
    match raw {
        OFF_BOARD => Edge::OffBoard,
        SEAM => Edge::Seam,
        id => match u8::try_from(id) {
            Ok(id) => Edge::Cell(Cell::new(id)),
            Err(_) => Edge::OffBoard,
        },
    }
}

/// Read-only view of the board graph.
///
/// Built once per game context; the edge tables themselves are static and
/// never mutated.
#[derive(Debug, Clone)]
pub struct BoardTopology {
    terrain: [bool; CELL_COUNT],
    exit: [bool; CELL_COUNT],
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardTopology {
    /// Builds the standard DeerPortal board.
    pub fn standard() -> Self {
        let mut terrain = [false; CELL_COUNT];
        for &id in TERRAIN.iter() {
            terrain[id as usize] = true;
        }
        let mut exit = [false; CELL_COUNT];
        for &id in EXIT_CELLS.iter() {
            exit[id as usize] = true;
        }
        BoardTopology { terrain, exit }
    }

    /// Returns the neighbor reached by one step from `cell` in `direction`.
    pub fn neighbor_in_direction(&self, cell: Cell, direction: Direction) -> Edge {
        let table = match direction {
            Direction::Left => &LEFT,
            Direction::Right => &RIGHT,
        };
        decode(table[cell.index()])
    }

    /// Returns true if the cell is impassable terrain.
    pub fn is_terrain(&self, cell: Cell) -> bool {
        self.terrain[cell.index()]
    }

    /// Returns true if the cell is one of the four portal cells.
    pub fn is_exit(&self, cell: Cell) -> bool {
        self.exit[cell.index()]
    }

    /// Start cell of the given player.
    pub fn start_cell(&self, quadrant: Quadrant) -> Cell {
        Cell::new(START_CELLS[quadrant.index()])
    }

    /// Portal cell at the end of the given quadrant's arm.
    pub fn exit_cell(&self, quadrant: Quadrant) -> Cell {
        Cell::new(EXIT_CELLS[quadrant.index()])
    }

    /// The fixed cells on which the quadrant's diamonds may be placed.
    pub fn diamond_candidates(&self, quadrant: Quadrant) -> impl Iterator<Item = Cell> {
        DIAMOND_CANDIDATES[quadrant.index()]
            .iter()
            .map(|&id| Cell::new(id))
    }

    /// Returns the orthogonally adjacent cells of `cell`, excluding terrain.
    ///
    /// Used for neighbor highlighting around the active player.
    pub fn neighbor_cells(&self, cell: Cell) -> Vec<Cell> {
        let (x, y) = (cell.x(), cell.y());
        let candidates = [
            y.checked_sub(1).and_then(|ny| Cell::from_xy(x, ny)),
            Cell::from_xy(x + 1, y),
            Cell::from_xy(x, y + 1),
            x.checked_sub(1).and_then(|nx| Cell::from_xy(nx, y)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|c| !self.is_terrain(*c))
            .collect()
    }
}
