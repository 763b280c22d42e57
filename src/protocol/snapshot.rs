//! JSON snapshots of the engine state.
//!
//! A snapshot is what a renderer reads once per frame: positions, counters,
//! the token field, the visible top of each card pile, and the results
//! table once the game is over.

use serde::Serialize;

use crate::board::{CardType, Cell, GameClock, PlayerState, Quadrant, TokenKind, ALL_QUADRANTS};
use crate::engine::Engine;
use crate::eval::GameResults;
use crate::movegen::Destinations;
use crate::resolve::GamePhase;

/// An on-board token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub id: usize,
    pub owner: Quadrant,
    pub kind: TokenKind,
    pub cell: Cell,
}

/// The visible state of one card pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PileView {
    pub element: Quadrant,
    pub active: bool,
    pub current: usize,
    pub visible_slot: usize,
    pub top: Option<CardType>,
}

/// Read-only view of an [`Engine`].
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub clock: &'a GameClock,
    pub destinations: Destinations,
    pub big_diamond_visible: bool,
    pub players: &'a [PlayerState],
    pub tokens: Vec<TokenView>,
    pub piles: Vec<PileView>,
    pub results: Option<&'a GameResults>,
}

impl<'a> Snapshot<'a> {
    /// Captures the engine's current state.
    pub fn capture(engine: &'a Engine) -> Self {
        let ctx = engine.context();
        let tokens = ctx
            .diamonds
            .diamonds()
            .iter()
            .filter_map(|d| {
                d.position.map(|cell| TokenView {
                    id: d.id,
                    owner: d.owner,
                    kind: d.kind,
                    cell,
                })
            })
            .collect();
        let piles = ALL_QUADRANTS
            .iter()
            .map(|&element| {
                let pile = ctx.deck.pile(element);
                PileView {
                    element,
                    active: pile.is_active(),
                    current: pile.current_index(),
                    visible_slot: pile.visible_slot(),
                    top: ctx.deck.current_title(element),
                }
            })
            .collect();

        Snapshot {
            phase: engine.phase(),
            clock: engine.clock(),
            destinations: engine.destinations(),
            big_diamond_visible: engine.big_diamond_visible(),
            players: &ctx.players,
            tokens,
            piles,
            results: engine.results(),
        }
    }

    /// Serializes the snapshot as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DIAMOND_COUNT;
    use crate::config::GameConfig;
    use crate::event::Input;

    #[test]
    fn snapshot_reflects_new_game() {
        let mut engine = Engine::new(GameConfig::all_ai(21)).unwrap();
        engine.boot().unwrap();
        engine.handle(Input::NewGameRequested).unwrap();

        let snap = Snapshot::capture(&engine);
        assert_eq!(snap.phase, GamePhase::IntroShader);
        assert_eq!(snap.tokens.len(), DIAMOND_COUNT);
        assert_eq!(snap.piles.len(), 4);
        assert!(snap.piles.iter().all(|p| p.active && p.current == 0));
        assert!(snap.results.is_none());
    }

    #[test]
    fn snapshot_json_has_expected_fields() {
        let mut engine = Engine::new(GameConfig::all_ai(22)).unwrap();
        engine.boot().unwrap();
        let json = Snapshot::capture(&engine).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "menu");
        assert_eq!(value["clock"]["round"], 1);
        assert_eq!(value["players"].as_array().unwrap().len(), 4);
        assert_eq!(value["players"][0]["quadrant"], "water");
        assert!(value["results"].is_null());
    }
}
