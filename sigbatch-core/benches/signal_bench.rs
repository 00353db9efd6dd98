//! Criterion benchmarks for the signal engine.
//!
//! Benchmarks:
//! 1. Rolling mean over a long close series at several windows
//! 2. Full frame computation (rolling mean + signal) from a dataset

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sigbatch_core::{Dataset, SignalEngine};

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn bench_rolling_mean(c: &mut Criterion) {
    let closes = make_closes(100_000);
    let mut group = c.benchmark_group("rolling_mean");
    for window in [5usize, 50, 500] {
        let engine = SignalEngine::new(window);
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, _| {
            b.iter(|| engine.rolling_mean(black_box(&closes)))
        });
    }
    group.finish();
}

fn bench_compute_frame(c: &mut Criterion) {
    let dataset = Dataset::from_closes(&make_closes(100_000));
    let engine = SignalEngine::new(20);
    c.bench_function("compute_frame_100k", |b| {
        b.iter(|| engine.compute(black_box(&dataset)))
    });
}

criterion_group!(benches, bench_rolling_mean, bench_compute_frame);
criterion_main!(benches);
