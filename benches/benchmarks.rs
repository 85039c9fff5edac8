use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xiangqi_rules::board::Board;
use xiangqi_rules::engine::Engine;
use xiangqi_rules::movegen::MoveGenerator;
use xiangqi_rules::perft::{perft, perft_parallel};
use xiangqi_rules::types::Side;

const MIDGAME_LAYOUT: &str = "\
r.ea.aehr
....g....
.ch....c.
s...s.s.s
..s......
......S..
S.S.S...S
.C...H.C.
....G....
R.EA.AE.R";

pub fn bench_raw_moves_from_start(c: &mut Criterion) {
    let bo = Board::new();
    let mut generator = MoveGenerator::new();
    c.bench_function("raw moves from start", |b| {
        b.iter(|| generator.recompute(black_box(&bo)))
    });
}

pub fn bench_recompute_all_from_start(c: &mut Criterion) {
    let bo = Board::new();
    let mut engine = Engine::new();
    c.bench_function("recompute all from start", |b| {
        b.iter(|| engine.recompute_all(black_box(&bo)))
    });
}

pub fn bench_recompute_all_midgame(c: &mut Criterion) {
    let bo = Board::from_layout(MIDGAME_LAYOUT).unwrap();
    let mut engine = Engine::new();
    c.bench_function("recompute all midgame", |b| {
        b.iter(|| engine.recompute_all(black_box(&bo)))
    });
}

pub fn bench_perft_2(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat-sampling");
    group.sample_size(10);

    let bo = Board::new();
    group.bench_function("perft 2 from start", |b| {
        b.iter(|| perft(black_box(&bo), Side::Home, black_box(2)))
    });
    group.bench_function("perft 2 from start parallel", |b| {
        b.iter(|| perft_parallel(black_box(&bo), Side::Home, black_box(2)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_raw_moves_from_start,
    bench_recompute_all_from_start,
    bench_recompute_all_midgame,
    bench_perft_2,
);
criterion_main!(benches);
