//! Criterion benchmarks for the path-string solvers.
//! Focus sizes: n in {6, 7, 8, 9} points (all 2^(n-1) patterns per run).
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p pathstring

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pathstring::api::{
    convex_hull, draw_general_position, enumerate_patterns, hull_jump, CountingOracle, DpSession,
    GeomCfg, PathString, PointCfg, PointSet, ReplayToken,
};

fn seeded(n: usize, seed: u64) -> PointSet {
    draw_general_position(
        PointCfg::with_count(n),
        GeomCfg::default(),
        ReplayToken::new(seed, 0),
    )
    .expect("sampler succeeds at bench sizes")
}

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp");
    group.sample_size(20);
    for &n in &[6usize, 7, 8, 9] {
        let points = seeded(n, 43);
        group.bench_with_input(BenchmarkId::new("enumerate_patterns", n), &n, |b, _| {
            b.iter(|| {
                let _ = enumerate_patterns(&points, GeomCfg::default(), &mut ());
            })
        });
        // fresh session per pattern, to see what the shared memo buys
        group.bench_with_input(BenchmarkId::new("cold_sessions", n), &n, |b, &n| {
            b.iter(|| {
                for p in PathString::all(n - 1).expect("bench length in range") {
                    let mut session = DpSession::new(&points, GeomCfg::default());
                    let _ = session.solve(p);
                }
            })
        });
    }
    group.finish();
}

fn bench_side_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("side");
    for &n in &[8usize, 16, 32, 64] {
        let points = seeded(n, 7);
        group.bench_with_input(BenchmarkId::new("convex_hull", n), &n, |b, _| {
            b.iter(|| {
                let _ = convex_hull(points.points());
            })
        });
    }
    for &len in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("oracle_zigzag", len), &len, |b, &len| {
            let steps: String = (0..len).map(|i| if i % 2 == 0 { 'U' } else { 'D' }).collect();
            let pattern: PathString = steps.parse().expect("valid zigzag");
            b.iter_batched(
                CountingOracle::new,
                |mut oracle| {
                    let _ = oracle.count(pattern);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = seeded(7, 11);
    let zigzag: PathString = "UDUDUD".parse().expect("valid pattern");
    group.bench_function("hull_jump/7", |b| {
        b.iter(|| {
            let _ = hull_jump(&points, zigzag);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_dp, bench_side_paths);
criterion_main!(benches);
