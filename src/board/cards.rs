//! Element card piles.
//!
//! Each quadrant has a pile of 32 cards drawn from a fixed distribution
//! (8 of each type). A pile is Fisher-Yates shuffled on a new game, read
//! front to back, and goes inactive once its last card has been used.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cell::{Quadrant, ALL_QUADRANTS, PLAYER_COUNT};

/// Number of cards in each pile.
pub const PILE_SIZE: usize = 32;

/// Size of the rotating window shown on top of a pile.
pub const VISIBLE_WINDOW: usize = 4;

/// The effect printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Freezes the pile owner for one turn.
    Stop,
    /// Removes one of the pile owner's card tokens.
    RemoveCard,
    /// Steals one of the pile owner's diamonds.
    Diamond,
    /// Steals up to two of the pile owner's diamonds.
    DoubleDiamond,
}

/// All card types in type-id order.
pub const ALL_CARD_TYPES: [CardType; 4] = [
    CardType::Stop,
    CardType::RemoveCard,
    CardType::Diamond,
    CardType::DoubleDiamond,
];

impl CardType {
    /// Returns the numeric type id `0..=3`.
    pub const fn type_id(self) -> u8 {
        self as u8
    }

    /// Returns the title shown on the card.
    pub const fn title(self) -> &'static str {
        match self {
            CardType::Stop => "stop",
            CardType::RemoveCard => "card",
            CardType::Diamond => "diamond",
            CardType::DoubleDiamond => "diamond x 2",
        }
    }
}

/// A single card within a pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_type: CardType,
    /// Position of the card in its pile, `0..32`.
    pub pile_index: u8,
}

/// Outcome of advancing a pile past its current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PileAdvance {
    /// The next card is now on top.
    Advanced,
    /// The last card was used; the pile is now inactive.
    Exhausted,
    /// The pile was already inactive; nothing changed.
    Inactive,
}

/// One quadrant's card pile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPile {
    cards: Vec<Card>,
    current: usize,
    active: bool,
}

impl CardPile {
    /// Builds a freshly shuffled pile.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut types: Vec<CardType> = ALL_CARD_TYPES
            .iter()
            .flat_map(|&t| std::iter::repeat(t).take(PILE_SIZE / ALL_CARD_TYPES.len()))
            .collect();
        types.shuffle(rng);
        let cards = types
            .into_iter()
            .enumerate()
            .map(|(i, card_type)| Card {
                card_type,
                pile_index: i as u8,
            })
            .collect();
        CardPile {
            cards,
            current: 0,
            active: true,
        }
    }

    /// All cards in draw order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Index of the card on top of the pile.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Slot of the rotating top-of-pile indicator, `0..4`.
    pub fn visible_slot(&self) -> usize {
        self.current % VISIBLE_WINDOW
    }

    /// Returns false once the pile has been used up.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The card on top, or None when the pile is inactive.
    pub fn current_card(&self) -> Option<Card> {
        if !self.active {
            return None;
        }
        self.cards.get(self.current).copied()
    }

    /// Moves past the current card.
    pub fn advance(&mut self) -> PileAdvance {
        if !self.active {
            return PileAdvance::Inactive;
        }
        if self.current + 1 >= self.cards.len() {
            self.active = false;
            return PileAdvance::Exhausted;
        }
        self.current += 1;
        PileAdvance::Advanced
    }
}

/// The four element piles, indexed by quadrant.
#[derive(Debug, Clone, Serialize)]
pub struct CardDeck {
    piles: [CardPile; PLAYER_COUNT],
}

impl CardDeck {
    /// Builds four freshly shuffled piles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        CardDeck {
            piles: ALL_QUADRANTS.map(|_| CardPile::shuffled(&mut *rng)),
        }
    }

    /// Reshuffles every pile, rewinds it, and marks it active.
    pub fn reshuffle_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for pile in self.piles.iter_mut() {
            *pile = CardPile::shuffled(rng);
        }
    }

    /// Returns the pile of the given element.
    pub fn pile(&self, element: Quadrant) -> &CardPile {
        &self.piles[element.index()]
    }

    /// Returns the card on top of the element's pile.
    pub fn draw_next(&self, element: Quadrant) -> Option<Card> {
        self.pile(element).current_card()
    }

    /// Type of the card on top of the element's pile.
    pub fn current_title(&self, element: Quadrant) -> Option<CardType> {
        self.draw_next(element).map(|c| c.card_type)
    }

    /// Advances the element's pile.
    pub fn advance(&mut self, element: Quadrant) -> PileAdvance {
        self.piles[element.index()].advance()
    }

    /// Elements whose piles have been used up.
    pub fn exhausted(&self) -> impl Iterator<Item = Quadrant> + '_ {
        ALL_QUADRANTS
            .into_iter()
            .filter(|q| !self.pile(*q).is_active())
    }
}
