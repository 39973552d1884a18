//! Criterion benchmarks for the full fluid step.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use eddy_bench::{reference_profile, seed_plume, stress_profile, warmed_grid};

fn bench_step_128(c: &mut Criterion) {
    let mut grid = warmed_grid(reference_profile(), 42, 10).unwrap();

    c.bench_function("step_128", |b| {
        b.iter(|| {
            grid.step();
            black_box(grid.density());
        });
    });
}

fn bench_step_512(c: &mut Criterion) {
    let mut grid = warmed_grid(stress_profile(), 42, 10).unwrap();

    c.bench_function("step_512", |b| {
        b.iter(|| {
            grid.step();
            black_box(grid.density());
        });
    });
}

fn bench_sourced_step_128(c: &mut Criterion) {
    let mut grid = warmed_grid(reference_profile(), 7, 10).unwrap();

    c.bench_function("sourced_step_128", |b| {
        b.iter(|| {
            seed_plume(&mut grid, 7);
            grid.step();
            black_box(grid.last_metrics().total_us);
        });
    });
}

criterion_group!(
    benches,
    bench_step_128,
    bench_step_512,
    bench_sourced_step_128
);
criterion_main!(benches);
