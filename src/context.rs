//! Shared game data.
//!
//! [`GameContext`] owns everything the rules mutate: the token field, the
//! card piles, the four player records, and the seeded PRNG. It is built
//! once per game and handed to the command processor and the turn engine.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{
    BoardTopology, CardDeck, DiamondField, PlayerState, Quadrant, ALL_QUADRANTS, PLAYER_COUNT,
};

/// All mutable rules state for one game, plus the board graph.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub topology: BoardTopology,
    pub diamonds: DiamondField,
    pub deck: CardDeck,
    pub players: [PlayerState; PLAYER_COUNT],
    pub rng: SmallRng,
}

impl GameContext {
    /// Builds a context with a fresh board and the given seat assignments.
    ///
    /// Tokens start off-board; call [`GameContext::reset`] to deal them.
    pub fn new(humans: [bool; PLAYER_COUNT], seed: u64) -> Self {
        let topology = BoardTopology::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let deck = CardDeck::new(&mut rng);
        let players = fresh_players(&topology, humans);
        GameContext {
            topology,
            diamonds: DiamondField::new(),
            deck,
            players,
            rng,
        }
    }

    /// Reinitializes players, tokens, and piles for a new game. The PRNG
    /// stream continues.
    pub fn reset(&mut self, humans: [bool; PLAYER_COUNT]) {
        self.players = fresh_players(&self.topology, humans);
        self.diamonds = DiamondField::new();
        self.diamonds.reshuffle_all(&self.topology, &mut self.rng);
        self.deck.reshuffle_all(&mut self.rng);
    }

    /// Returns the player of the given quadrant.
    pub fn player(&self, quadrant: Quadrant) -> &PlayerState {
        &self.players[quadrant.index()]
    }

    /// Returns the player of the given quadrant mutably.
    pub fn player_mut(&mut self, quadrant: Quadrant) -> &mut PlayerState {
        &mut self.players[quadrant.index()]
    }
}

fn fresh_players(topology: &BoardTopology, humans: [bool; PLAYER_COUNT]) -> [PlayerState; PLAYER_COUNT] {
    ALL_QUADRANTS.map(|q| PlayerState::new(q, topology.start_cell(q), humans[q.index()]))
}
