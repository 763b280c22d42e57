//! Rule scenarios exercised through the library API.

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;

use deerportal::board::{
    BoardTopology, Cell, PileAdvance, Quadrant, TokenKind, ALL_QUADRANTS, CELL_COUNT,
    DIAMOND_COUNT, PILE_SIZE,
};
use deerportal::config::GameConfig;
use deerportal::context::GameContext;
use deerportal::engine::Engine;
use deerportal::event::{Input, Notification, SoundEffect};
use deerportal::movegen::compute_destinations;
use deerportal::resolve::{CommandProcessor, GamePhase};

fn ai_engine(seed: u64) -> Engine {
    let mut engine = Engine::new(GameConfig {
        ai_think_ms: 0,
        ..GameConfig::all_ai(seed)
    })
    .unwrap();
    engine.boot().unwrap();
    for input in [
        Input::NewGameRequested,
        Input::IntroFinished,
        Input::StartGameRequested,
    ] {
        engine.handle(input).unwrap();
    }
    engine
}

fn tick(engine: &mut Engine) {
    engine.handle(Input::Tick(Duration::ZERO)).unwrap();
}

#[test]
fn corner_start_moves_only_toward_portal() {
    let topo = BoardTopology::standard();
    let d = compute_destinations(&topo, Cell::new(0), 3);
    assert_eq!(d.left, None);
    assert_eq!(d.right, Some(Cell::new(3)));
}

#[test]
fn exhausted_pile_clears_its_tokens() {
    let mut ctx = GameContext::new([false; 4], 31);
    ctx.reset([false; 4]);
    for _ in 0..PILE_SIZE - 1 {
        assert_eq!(ctx.deck.advance(Quadrant::Earth), PileAdvance::Advanced);
    }
    let earth_cells: Vec<Cell> = ctx
        .diamonds
        .diamonds()
        .iter()
        .filter(|d| d.kind == TokenKind::Card(Quadrant::Earth))
        .filter_map(|d| d.position)
        .collect();
    assert_eq!(earth_cells.len(), 8);

    let mut out = Vec::new();
    CommandProcessor::new(&mut ctx, &mut out).process_card(Quadrant::Water, earth_cells[0]);

    assert!(!ctx.deck.pile(Quadrant::Earth).is_active());
    assert!(earth_cells.iter().all(|&c| ctx.diamonds.is_field_empty(c)));
    assert_eq!(ctx.deck.draw_next(Quadrant::Earth), None);
}

/// Ticks an all-AI game until it parks in the round summary.
fn play_to_round_end(engine: &mut Engine) {
    let mut guard = 0;
    while engine.phase() != GamePhase::GuiEndRound {
        tick(engine);
        guard += 1;
        assert!(guard < 1_000);
    }
}

#[test]
fn cash_leader_flag_follows_strict_maximum() {
    let mut engine = Engine::new(GameConfig {
        ai_think_ms: 0,
        pause_between_rounds: true,
        ..GameConfig::all_ai(41)
    })
    .unwrap();
    engine.boot().unwrap();
    for input in [
        Input::NewGameRequested,
        Input::IntroFinished,
        Input::StartGameRequested,
    ] {
        engine.handle(input).unwrap();
    }

    play_to_round_end(&mut engine);
    engine.context_mut().player_mut(Quadrant::Fire).cash = 50;
    engine.handle(Input::Continue).unwrap();
    let flags: Vec<bool> = engine
        .context()
        .players
        .iter()
        .map(|p| p.reach_portal_mode)
        .collect();
    assert_eq!(flags, vec![false, false, true, false]);
    assert!(engine.big_diamond_visible());

    play_to_round_end(&mut engine);
    let fire_cash = engine.context().player(Quadrant::Fire).cash;
    engine.context_mut().player_mut(Quadrant::Air).cash = fire_cash;
    engine.handle(Input::Continue).unwrap();
    assert!(engine.context().players.iter().all(|p| !p.reach_portal_mode));
    assert!(!engine.big_diamond_visible());
}

#[test]
fn deer_mode_starts_once_per_game() {
    for seed in [1, 2, 3, 4] {
        let mut engine = ai_engine(seed);
        let mut notes = engine.drain_notifications();
        let mut guard = 0;
        while engine.phase() != GamePhase::EndGame {
            tick(&mut engine);
            notes.extend(engine.drain_notifications());
            guard += 1;
            assert!(guard < 100_000);
        }
        let deer_banners = notes
            .iter()
            .filter(|n| **n == Notification::banner("deer mode"))
            .count();
        let deer_sounds = notes
            .iter()
            .filter(|n| **n == Notification::sound(SoundEffect::DeerMode))
            .count();
        assert_eq!(deer_banners, 1, "seed {seed}");
        assert_eq!(deer_sounds, 1, "seed {seed}");

        let firsts = engine
            .context()
            .players
            .iter()
            .filter(|p| p.reached_portal_first)
            .count();
        assert_eq!(firsts, 1);
        let results = engine.results().unwrap();
        assert!(results.rows.iter().any(|r| r.reached_portal_first));
    }
}

#[test]
fn removing_from_an_empty_quadrant_pays_nothing() {
    let mut ctx = GameContext::new([false; 4], 8);
    ctx.reset([false; 4]);
    let mut out = Vec::new();
    let mut processor = CommandProcessor::new(&mut ctx, &mut out);
    processor.remove_all_items(Quadrant::Air);
    assert_eq!(processor.remove_diamond(Quadrant::Air), None);
    assert!(ctx.players.iter().all(|p| p.cash == 0));
}

#[test]
fn restart_rebuilds_a_full_board() {
    let mut engine = ai_engine(17);
    while engine.phase() != GamePhase::EndGame {
        tick(&mut engine);
    }
    engine.handle(Input::NewGameRequested).unwrap();
    assert_eq!(engine.phase(), GamePhase::IntroShader);
    assert_eq!(engine.context().diamonds.on_board_count(), DIAMOND_COUNT);
    assert!(engine.context().players.iter().all(|p| !p.done && p.cash == 0));
    assert!(ALL_QUADRANTS
        .iter()
        .all(|&q| engine.context().deck.pile(q).is_active()));
}

proptest! {
    #[test]
    fn reshuffle_keeps_tokens_on_distinct_candidates(seed in any::<u64>()) {
        let mut ctx = GameContext::new([false; 4], seed);
        ctx.reset([false; 4]);
        let mut seen = HashSet::new();
        for d in ctx.diamonds.diamonds() {
            let cell = d.position.unwrap();
            prop_assert!(seen.insert(cell));
            prop_assert!(!ctx.topology.is_terrain(cell));
            prop_assert_eq!(cell.quadrant(), d.owner);
            prop_assert!(ctx.topology.diamond_candidates(d.owner).any(|c| c == cell));
        }
    }

    #[test]
    fn destinations_never_land_on_terrain(id in 0usize..CELL_COUNT, steps in 1u8..=6) {
        let topo = BoardTopology::standard();
        let start = Cell::from_index(id).unwrap();
        prop_assume!(!topo.is_terrain(start));
        let d = compute_destinations(&topo, start, steps);
        for cell in [d.left, d.right].into_iter().flatten() {
            prop_assert!(!topo.is_terrain(cell));
            prop_assert_eq!(cell.quadrant(), start.quadrant());
        }
    }

    #[test]
    fn play_preserves_invariants(seed in any::<u64>(), ticks in 0usize..400) {
        let mut engine = ai_engine(seed);
        let mut finished = 0;
        for _ in 0..ticks {
            tick(&mut engine);
            let ctx = engine.context();
            let mut seen = HashSet::new();
            for d in ctx.diamonds.diamonds() {
                if let Some(cell) = d.position {
                    prop_assert!(seen.insert(cell));
                    prop_assert_eq!(ctx.diamonds.occupant(cell).map(|o| o.id), Some(d.id));
                }
            }
            for p in &ctx.players {
                prop_assert!(!ctx.topology.is_terrain(p.position));
                prop_assert!(p.frozen_turns_left <= 16);
                if p.done {
                    prop_assert!(p.reached_portal);
                    prop_assert!(ctx.topology.is_exit(p.position));
                }
            }
            prop_assert!(engine.clock().finished_players >= finished);
            finished = engine.clock().finished_players;
        }
    }
}
