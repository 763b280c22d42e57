use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use deerportal::board::{BoardTopology, Cell, DiamondField, Quadrant, ALL_QUADRANTS};
use deerportal::context::GameContext;
use deerportal::eval::{choose_destination, compute_results};
use deerportal::movegen::compute_destinations;
use deerportal::selfplay::{play_game, SelfPlayConfig};

fn bench_destinations_all_cells(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let starts: Vec<Cell> = (0..=255u8)
        .map(Cell::new)
        .filter(|&cell| !topo.is_terrain(cell))
        .collect();
    c.bench_function("destinations_all_cells_all_rolls", |b| {
        b.iter(|| {
            let mut reachable = 0usize;
            for &start in &starts {
                for steps in 1..=6 {
                    let d = compute_destinations(&topo, black_box(start), steps);
                    reachable += usize::from(d.left.is_some()) + usize::from(d.right.is_some());
                }
            }
            reachable
        })
    });
}

fn bench_reshuffle_all(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut field = DiamondField::new();
    c.bench_function("diamond_reshuffle_all", |b| {
        b.iter(|| field.reshuffle_all(black_box(&topo), &mut rng))
    });
}

fn bench_context_reset(c: &mut Criterion) {
    let mut ctx = GameContext::new([false; 4], 7);
    c.bench_function("context_reset", |b| b.iter(|| ctx.reset(black_box([false; 4]))));
}

fn bench_choose_destination(c: &mut Criterion) {
    let mut ctx = GameContext::new([false; 4], 3);
    ctx.reset([false; 4]);
    let start = ctx.topology.start_cell(Quadrant::Earth);
    let destinations = compute_destinations(&ctx.topology, start, 4);
    c.bench_function("choose_destination", |b| {
        b.iter(|| {
            choose_destination(
                black_box(destinations),
                false,
                false,
                &ctx.diamonds,
                &mut ctx.rng,
            )
        })
    });
}

fn bench_full_ai_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_ai_game");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    let config = SelfPlayConfig {
        quiet: true,
        ..SelfPlayConfig::default()
    };
    let mut seed = 0u64;
    group.bench_function("play_game", |b| {
        b.iter(|| {
            seed += 1;
            play_game(&config, 0, black_box(seed))
        })
    });
    group.finish();
}

fn bench_compute_results(c: &mut Criterion) {
    let ctx = GameContext::new([false; 4], 1);
    let mut players = ctx.players.clone();
    for (i, q) in ALL_QUADRANTS.iter().enumerate() {
        players[q.index()].cash = (i as u32 * 3) % 5;
        players[q.index()].reached_portal = i % 2 == 0;
    }
    c.bench_function("compute_results", |b| {
        b.iter(|| compute_results(black_box(&players)))
    });
}

criterion_group!(
    benches,
    bench_destinations_all_cells,
    bench_reshuffle_all,
    bench_context_reset,
    bench_choose_destination,
    bench_full_ai_game,
    bench_compute_results,
);
criterion_main!(benches);
