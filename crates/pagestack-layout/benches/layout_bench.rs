//! Benchmarks for the stack solvers.
//!
//! Run with: cargo bench -p pagestack-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pagestack_layout::{
    MobileTuning, StackLayout, StackTuning, ViewportMetrics, mobile_positions,
    stack_peek_offsets, stack_positions,
};
use std::hint::black_box;

fn widths(n: usize) -> Vec<f64> {
    (0..n).map(|i| 320.0 + (i % 4) as f64 * 60.0).collect()
}

fn bench_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/stack_positions");
    let tuning = StackTuning::default();

    for n in [3, 8, 20, 64] {
        let sizes = widths(n);
        group.bench_with_input(BenchmarkId::new("idle", n), &n, |b, &n| {
            b.iter(|| black_box(stack_positions(None, n, 1440.0, &tuning, None)))
        });
        group.bench_with_input(BenchmarkId::new("active_mid_capped", n), &n, |b, &n| {
            b.iter(|| {
                black_box(stack_positions(
                    Some(n / 2),
                    n,
                    1440.0,
                    &tuning,
                    Some(&sizes),
                ))
            })
        });
        group.bench_with_input(BenchmarkId::new("active_top_capped", n), &n, |b, &n| {
            b.iter(|| black_box(stack_positions(Some(n - 1), n, 1440.0, &tuning, Some(&sizes))))
        });
    }

    group.finish();
}

fn bench_peek(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/peek_offsets");
    for n in [8, 20, 64] {
        group.bench_with_input(BenchmarkId::new("reveal_from_bottom", n), &n, |b, &n| {
            b.iter(|| black_box(stack_peek_offsets(Some(0), Some(n - 1), n)))
        });
    }
    group.finish();
}

fn bench_mobile(c: &mut Criterion) {
    let tuning = MobileTuning::default();
    c.bench_function("layout/mobile_positions/20", |b| {
        b.iter(|| black_box(mobile_positions(Some(7), 20, 844.0, &tuning)))
    });
}

fn bench_full_solve(c: &mut Criterion) {
    let layout = StackLayout::horizontal();
    let metrics = ViewportMetrics::new(1440.0, 900.0);
    let sizes = widths(20);
    c.bench_function("layout/solve/20", |b| {
        b.iter(|| {
            black_box(
                layout
                    .solve(Some(12), Some(4), 20, metrics, Some(&sizes))
                    .positions(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_positions,
    bench_peek,
    bench_mobile,
    bench_full_solve
);
criterion_main!(benches);
