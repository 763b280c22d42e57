//! Collectible tokens on the board.
//!
//! Each quadrant owns 28 tokens: two card tokens per element and twenty pure
//! diamonds. Tokens are placed on the quadrant's candidate cells, picked up
//! when a player lands on them, and reshuffled on a new game or meditation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, Quadrant, ALL_QUADRANTS, CELL_COUNT, PLAYER_COUNT};
use super::topology::BoardTopology;

/// Tokens owned by each quadrant.
pub const DIAMONDS_PER_QUADRANT: usize = 28;

/// Total number of tokens on a full board.
pub const DIAMOND_COUNT: usize = DIAMONDS_PER_QUADRANT * PLAYER_COUNT;

/// Sprite id of a pure diamond.
pub const PURE_DIAMOND_SPRITE: u8 = 4;

/// Sprite layout shared by every quadrant: two card tokens of each element,
/// then the pure diamonds.
static QUADRANT_SETUP: [u8; DIAMONDS_PER_QUADRANT] = [
    0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
];

/// What a token is worth when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Element card token; draws from the pile of that element.
    Card(Quadrant),
    /// Pure diamond; worth one cash.
    PureDiamond,
}

impl TokenKind {
    /// Returns the sprite id: `0..=3` for card tokens, 4 for a pure diamond.
    pub const fn sprite_id(self) -> u8 {
        match self {
            TokenKind::Card(element) => element as u8,
            TokenKind::PureDiamond => PURE_DIAMOND_SPRITE,
        }
    }

    /// Parses a sprite id.
    pub fn from_sprite_id(id: u8) -> Option<TokenKind> {
        if id == PURE_DIAMOND_SPRITE {
            return Some(TokenKind::PureDiamond);
        }
        Quadrant::from_index(id as usize).map(TokenKind::Card)
    }

    /// Returns true for element card tokens.
    pub const fn is_card(self) -> bool {
        matches!(self, TokenKind::Card(_))
    }
}

/// A single collectible token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diamond {
    pub id: usize,
    pub owner: Quadrant,
    pub kind: TokenKind,
    /// Current cell, or None once collected / removed.
    pub position: Option<Cell>,
}

/// All tokens plus a per-cell occupancy index.
#[derive(Debug, Clone)]
pub struct DiamondField {
    diamonds: Vec<Diamond>,
    occupancy: [Option<usize>; CELL_COUNT],
}

impl Default for DiamondField {
    fn default() -> Self {
        Self::new()
    }
}

impl DiamondField {
    /// Creates the full token set from the setup table, all off-board.
    pub fn new() -> Self {
        let mut diamonds = Vec::with_capacity(DIAMOND_COUNT);
        for owner in ALL_QUADRANTS {
            for &sprite in QUADRANT_SETUP.iter() {
                let kind = TokenKind::from_sprite_id(sprite).unwrap_or(TokenKind::PureDiamond);
                diamonds.push(Diamond {
                    id: diamonds.len(),
                    owner,
                    kind,
                    position: None,
                });
            }
        }
        DiamondField {
            diamonds,
            occupancy: [None; CELL_COUNT],
        }
    }

    /// All tokens, indexed by id.
    pub fn diamonds(&self) -> &[Diamond] {
        &self.diamonds
    }

    /// Looks up a token by id.
    pub fn get(&self, id: usize) -> Option<&Diamond> {
        self.diamonds.get(id)
    }

    /// Places every token of `quadrant` on a random free candidate cell.
    ///
    /// Collected tokens of the quadrant return to the board as well. Each
    /// draw removes the chosen cell from the pool, so no two tokens of the
    /// quadrant share a cell.
    pub fn reshuffle_quadrant<R: Rng + ?Sized>(
        &mut self,
        quadrant: Quadrant,
        topology: &BoardTopology,
        rng: &mut R,
    ) {
        let ids: Vec<usize> = self.owned_by(quadrant).collect();
        for &id in &ids {
            self.lift(id);
        }

        let mut free: Vec<Cell> = topology
            .diamond_candidates(quadrant)
            .filter(|c| self.occupancy[c.index()].is_none())
            .collect();

        for id in ids {
            if free.is_empty() {
                tracing::error!(%quadrant, id, "no free candidate cell left for token");
                break;
            }
            let cell = free.swap_remove(rng.gen_range(0..free.len()));
            self.place(id, cell);
        }
    }

    /// Reshuffles all four quadrants.
    pub fn reshuffle_all<R: Rng + ?Sized>(&mut self, topology: &BoardTopology, rng: &mut R) {
        for quadrant in ALL_QUADRANTS {
            self.reshuffle_quadrant(quadrant, topology, rng);
        }
    }

    /// Returns true if no token occupies the cell.
    pub fn is_field_empty(&self, cell: Cell) -> bool {
        self.occupancy[cell.index()].is_none()
    }

    /// Returns the token occupying the cell, if any.
    pub fn occupant(&self, cell: Cell) -> Option<&Diamond> {
        self.occupancy[cell.index()].map(|id| &self.diamonds[id])
    }

    /// Returns the kind of the token occupying the cell, if any.
    pub fn token_at(&self, cell: Cell) -> Option<TokenKind> {
        self.occupant(cell).map(|d| d.kind)
    }

    /// Removes the token on `cell` from the board. Returns its id, or None
    /// when the cell was already empty.
    pub fn collect(&mut self, cell: Cell) -> Option<usize> {
        let id = self.occupancy[cell.index()]?;
        self.lift(id);
        Some(id)
    }

    /// Removes a token by id. Returns the cell it was on.
    pub fn collect_id(&mut self, id: usize) -> Option<Cell> {
        let cell = self.diamonds.get(id)?.position?;
        self.lift(id);
        Some(cell)
    }

    /// Ids of on-board tokens owned by `quadrant` that match `filter`.
    pub fn on_board<F>(&self, quadrant: Quadrant, filter: F) -> Vec<usize>
    where
        F: Fn(TokenKind) -> bool,
    {
        self.diamonds
            .iter()
            .filter(|d| d.owner == quadrant && d.position.is_some() && filter(d.kind))
            .map(|d| d.id)
            .collect()
    }

    /// Removes every on-board token owned by `quadrant`. Returns the
    /// removed `(id, cell)` pairs.
    pub fn remove_all_items(&mut self, quadrant: Quadrant) -> Vec<(usize, Cell)> {
        let ids: Vec<usize> = self.owned_by(quadrant).collect();
        self.remove_ids(ids)
    }

    /// Removes every on-board token of the given kind, in any quadrant.
    pub fn remove_all_of_kind(&mut self, kind: TokenKind) -> Vec<(usize, Cell)> {
        let ids: Vec<usize> = self
            .diamonds
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.id)
            .collect();
        self.remove_ids(ids)
    }

    /// Number of tokens currently on the board.
    pub fn on_board_count(&self) -> usize {
        self.diamonds.iter().filter(|d| d.position.is_some()).count()
    }

    fn remove_ids(&mut self, ids: Vec<usize>) -> Vec<(usize, Cell)> {
        ids.into_iter()
            .filter_map(|id| self.collect_id(id).map(|cell| (id, cell)))
            .collect()
    }

    fn owned_by(&self, quadrant: Quadrant) -> impl Iterator<Item = usize> + '_ {
        self.diamonds
            .iter()
            .filter(move |d| d.owner == quadrant)
            .map(|d| d.id)
    }

    fn lift(&mut self, id: usize) {
        if let Some(cell) = self.diamonds[id].position.take() {
            self.occupancy[cell.index()] = None;
        }
    }

    fn place(&mut self, id: usize, cell: Cell) {
        self.occupancy[cell.index()] = Some(id);
        self.diamonds[id].position = Some(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn shuffled_field(seed: u64) -> DiamondField {
        let topo = BoardTopology::standard();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut field = DiamondField::new();
        field.reshuffle_all(&topo, &mut rng);
        field
    }

    #[test]
    fn setup_table_composition() {
        let field = DiamondField::new();
        assert_eq!(field.diamonds().len(), 112);
        for q in ALL_QUADRANTS {
            let owned: Vec<&Diamond> = field.diamonds().iter().filter(|d| d.owner == q).collect();
            assert_eq!(owned.len(), DIAMONDS_PER_QUADRANT);
            let pure = owned.iter().filter(|d| d.kind == TokenKind::PureDiamond).count();
            assert_eq!(pure, 20);
            for element in ALL_QUADRANTS {
                let n = owned.iter().filter(|d| d.kind == TokenKind::Card(element)).count();
                assert_eq!(n, 2);
            }
        }
        assert_eq!(field.on_board_count(), 0);
    }

    #[test]
    fn sprite_ids_roundtrip() {
        for id in 0..=4 {
            assert_eq!(TokenKind::from_sprite_id(id).map(|k| k.sprite_id()), Some(id));
        }
        assert_eq!(TokenKind::from_sprite_id(5), None);
        assert!(TokenKind::Card(Quadrant::Fire).is_card());
        assert!(!TokenKind::PureDiamond.is_card());
    }

    #[test]
    fn reshuffle_places_every_token_on_candidates() {
        let topo = BoardTopology::standard();
        let field = shuffled_field(7);
        assert_eq!(field.on_board_count(), DIAMOND_COUNT);
        for d in field.diamonds() {
            let cell = d.position.unwrap();
            assert!(topo.diamond_candidates(d.owner).any(|c| c == cell));
            assert_eq!(field.occupant(cell).map(|o| o.id), Some(d.id));
        }
    }

    #[test]
    fn reshuffle_restores_collected_tokens() {
        let topo = BoardTopology::standard();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = shuffled_field(3);
        let removed = field.remove_all_items(Quadrant::Earth);
        assert_eq!(removed.len(), DIAMONDS_PER_QUADRANT);
        field.reshuffle_quadrant(Quadrant::Earth, &topo, &mut rng);
        assert_eq!(field.on_board_count(), DIAMOND_COUNT);
    }

    #[test]
    fn collect_empties_cell() {
        let mut field = shuffled_field(11);
        let cell = field.diamonds()[5].position.unwrap();
        assert!(!field.is_field_empty(cell));
        assert_eq!(field.collect(cell), Some(5));
        assert!(field.is_field_empty(cell));
        assert_eq!(field.diamonds()[5].position, None);
        assert_eq!(field.collect(cell), None);
    }

    #[test]
    fn token_at_reports_kind() {
        let field = shuffled_field(1);
        let d = field.diamonds()[0];
        assert_eq!(field.token_at(d.position.unwrap()), Some(d.kind));
        assert_eq!(field.token_at(Cell::new(0)), None);
    }

    #[test]
    fn remove_all_of_kind_spans_quadrants() {
        let mut field = shuffled_field(5);
        let removed = field.remove_all_of_kind(TokenKind::Card(Quadrant::Air));
        assert_eq!(removed.len(), 8);
        assert!(field
            .diamonds()
            .iter()
            .filter(|d| d.kind == TokenKind::Card(Quadrant::Air))
            .all(|d| d.position.is_none()));
        assert_eq!(field.on_board_count(), DIAMOND_COUNT - 8);
    }

    #[test]
    fn on_board_filters_by_owner_and_kind() {
        let mut field = shuffled_field(9);
        let pure = field.on_board(Quadrant::Water, |k| k == TokenKind::PureDiamond);
        assert_eq!(pure.len(), 20);
        field.collect_id(pure[0]);
        let pure = field.on_board(Quadrant::Water, |k| k == TokenKind::PureDiamond);
        assert_eq!(pure.len(), 19);
        let cards = field.on_board(Quadrant::Water, TokenKind::is_card);
        assert_eq!(cards.len(), 8);
    }
}
