//! Benchmarks for board, generator and search performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use philidor::{Board, Engine, NullIo};

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = Board::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    let mut castling = Board::new();
    castling
        .reset(Some("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"))
        .expect("valid FEN");
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("castling", depth), &depth, |b, &depth| {
            b.iter(|| castling.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let mut middlegame = Board::new();
    middlegame
        .reset(Some(
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        ))
        .expect("valid FEN");
    group.bench_function("middlegame", |b| {
        b.iter(|| {
            black_box(middlegame.evaluate(philidor::Color::White, -400_000, 400_000));
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [2usize, 3, 4] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut engine = Engine::with_tt_entries(1 << 18);
                engine.set_io(Box::new(NullIo));
                engine.settings.use_book = true; // no book: forces a search
                engine.settings.verbose = false;
                engine.settings.level_max_max = depth;
                engine.settings.time_budget_ms = 60_000;
                engine.compute_next_move();
                black_box(engine.nodes_searched())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_evaluate, bench_search);
criterion_main!(benches);
