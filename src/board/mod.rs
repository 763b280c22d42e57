//! Board representation and game-state types.
//!
//! Contains the static board graph, the collectible tokens, the card piles,
//! the player records, and the game clock.

pub mod cards;
pub mod cell;
pub mod diamonds;
pub mod player;
pub mod state;
pub mod topology;

pub use cards::{Card, CardDeck, CardPile, CardType, PileAdvance, ALL_CARD_TYPES, PILE_SIZE};
pub use cell::{Cell, Quadrant, ALL_QUADRANTS, BOARD_WIDTH, CELL_COUNT, PLAYER_COUNT};
pub use diamonds::{Diamond, DiamondField, TokenKind, DIAMOND_COUNT, DIAMONDS_PER_QUADRANT};
pub use player::{PlayerState, DICE_WAITING};
pub use state::{GameClock, Season, MONTHS_PER_SEASON, MONTHS_PER_YEAR};
pub use topology::{BoardTopology, Direction, Edge, CANDIDATES_PER_QUADRANT, TERRAIN_COUNT};
