use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use matr::prelude::*;

// ---------------------------------------------------------------------------
// Dense product: serial vs row-parallel
// ---------------------------------------------------------------------------

fn matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_f64");
    for size in [32usize, 128, 256] {
        let a = random_seeded(size, size, 1);
        let b = random_seeded(size, size, 2);

        let serial = LinalgConfig::default().with_parallel_threshold(usize::MAX);
        group.bench_with_input(BenchmarkId::new("serial", size), &size, |bench, _| {
            bench.iter(|| black_box(a.matrix_multiply_with_config(&b, &serial).unwrap()))
        });

        let parallel = LinalgConfig::default().with_parallel_threshold(1);
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, _| {
            bench.iter(|| black_box(a.matrix_multiply_with_config(&b, &parallel).unwrap()))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Solver facade
// ---------------------------------------------------------------------------

fn solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_f64");
    for size in [16usize, 64, 128] {
        let a = random_seeded(size, size, 3)
            .plus(&identity(size, size).scale(size as f64).unwrap())
            .unwrap();
        let b = random_seeded(size, 1, 4);
        group.bench_with_input(BenchmarkId::new("lu", size), &size, |bench, _| {
            bench.iter(|| black_box(a.solve(&b).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("svd_cond", size), &size, |bench, _| {
            bench.iter(|| black_box(a.cond().unwrap()))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Broadcasting arithmetic
// ---------------------------------------------------------------------------

fn broadcast(c: &mut Criterion) {
    let a = random_seeded(256, 256, 5);
    let row = random_seeded(1, 256, 6);
    c.bench_function("broadcast_plus_row_256", |bench| {
        bench.iter(|| black_box(a.plus(&row).unwrap()))
    });
}

criterion_group!(benches, matmul, solve, broadcast);
criterion_main!(benches);
