use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ivory_chess::engines::engine_config::{MctsConfig, MinimaxConfig};
use ivory_chess::engines::engine_mcts::MctsAi;
use ivory_chess::engines::engine_minimax::MinimaxAi;
use ivory_chess::engines::engine_trait::ChessAi;
use ivory_chess::game_state::chess_types::Color;
use ivory_chess::search::progress::NullProgress;
use ivory_chess::utils::fen_parser::parse_placement;
use ivory_chess::utils::long_algebraic::to_long_algebraic;

#[derive(Clone, Copy)]
struct SearchCase {
    name: &'static str,
    placement: &'static str,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
    },
    SearchCase {
        name: "tactical",
        placement: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    },
    SearchCase {
        name: "end_kpk",
        placement: "8/8/8/8/8/4k3/4P3/4K3",
    },
];

const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1";

fn minimax_config(depth: u32) -> MinimaxConfig {
    MinimaxConfig {
        max_depth: depth,
        alpha_beta_pruning: true,
        seed: Some(7),
    }
}

fn mcts_config(iterations: u32, worker_threads: usize) -> MctsConfig {
    MctsConfig {
        max_iterations: Some(iterations),
        worker_threads,
        seed: Some(7),
        ..MctsConfig::default()
    }
}

fn guard_finds_mate(ai: &mut dyn ChessAi) {
    let mut game = parse_placement(MATE_IN_ONE).expect("guard placement should parse");
    let mv = ai
        .calculate_recommended_move(Color::White, &mut game, &mut NullProgress)
        .expect("guard search should return a move");
    assert_eq!(to_long_algebraic(&mv), "a1a8", "{} missed mate in one", ai.name());
}

fn bench_minimax(c: &mut Criterion) {
    let depth = std::env::var("IVORY_BENCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(3)
        .max(1);

    guard_finds_mate(&mut MinimaxAi::new(minimax_config(2)));

    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in CASES {
        let game = parse_placement(case.placement).expect("benchmark placement should parse");
        group.bench_with_input(
            BenchmarkId::new(case.name, format!("d{depth}")),
            &game,
            |b, game| {
                let mut ai = MinimaxAi::new(minimax_config(depth));
                b.iter(|| {
                    let mut game = game.clone();
                    let mv = ai.calculate_recommended_move(
                        Color::White,
                        black_box(&mut game),
                        &mut NullProgress,
                    );
                    black_box(mv)
                });
            },
        );
    }

    group.finish();
}

fn bench_mcts(c: &mut Criterion) {
    guard_finds_mate(&mut MctsAi::new(MctsConfig {
        max_rollout_plies: 30,
        ..mcts_config(80, 0)
    }));

    let mut group = c.benchmark_group("mcts");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for worker_threads in [0usize, 2, 4] {
        let case = &CASES[0];
        let game = parse_placement(case.placement).expect("benchmark placement should parse");
        group.bench_with_input(
            BenchmarkId::new(case.name, format!("workers{worker_threads}")),
            &game,
            |b, game| {
                let mut ai = MctsAi::new(mcts_config(40, worker_threads));
                b.iter(|| {
                    let mut game = game.clone();
                    let mv = ai.calculate_recommended_move(
                        Color::White,
                        black_box(&mut game),
                        &mut NullProgress,
                    );
                    black_box(mv)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_minimax, bench_mcts);
criterion_main!(search_benches);
