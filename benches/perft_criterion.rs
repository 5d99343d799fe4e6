use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ivory_chess::game_state::chess_types::Color;
use ivory_chess::move_generation::perft::{perft, perft_multi_threaded};
use ivory_chess::utils::fen_parser::parse_placement;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    placement: &'static str,
    to_move: Color,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        to_move: Color::White,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        placement: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        to_move: Color::White,
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        placement: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
        to_move: Color::White,
        expected_nodes: &[14, 191, 2812],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game = parse_placement(case.placement).expect("benchmark placement should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&mut game.clone(), case.to_move, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let mut bench_game = game.clone();
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count =
                            perft(black_box(&mut bench_game), case.to_move, black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_perft_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_threads");
    group.sample_size(10);

    let case = &CASES[0];
    let game = parse_placement(case.placement).expect("benchmark placement should parse");
    let depth = case.expected_nodes.len() as u8;
    let expected = case.expected_nodes[case.expected_nodes.len() - 1];
    assert_eq!(perft_multi_threaded(&game, case.to_move, depth).nodes as u64, expected);

    group.bench_function(format!("{}_d{}", case.name, depth), |b| {
        b.iter(|| black_box(perft_multi_threaded(black_box(&game), case.to_move, depth).nodes))
    });

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_perft_threads);
criterion_main!(perft_benches);
