//! Benchmarks for matrix construction, elimination and full solves.
//!
//! ```bash
//! cargo bench -p lockcube-solver
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use lockcube_solver::{Eliminator, Extents, GridSnapshot, LinearSystem, Solver, SolverConfig};
use lockcube_world::LockCube;

const SIZES: [(usize, usize, usize); 4] = [(4, 4, 4), (6, 6, 6), (8, 8, 8), (10, 12, 14)];

fn snapshot((x, y, z): (usize, usize, usize)) -> GridSnapshot {
    let ext = Extents::new(x, y, z).unwrap();
    LockCube::with_extents(ext, 3, 0x10C4).unwrap().read()
}

fn label((x, y, z): (usize, usize, usize)) -> String {
    format!("{x}x{y}x{z}")
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for dims in SIZES {
        let snap = snapshot(dims);
        group.throughput(Throughput::Elements(snap.extents().cell_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label(dims)), &snap, |b, s| {
            b.iter(|| black_box(LinearSystem::build(black_box(s))));
        });
    }
    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    group.sample_size(20);
    for dims in SIZES {
        let snap = snapshot(dims);
        let system = LinearSystem::build(&snap).unwrap();
        let sequential = Eliminator::new(SolverConfig::default().with_threads(1));
        let parallel = Eliminator::new(SolverConfig::default().with_min_parallel_rows(0));

        group.bench_function(BenchmarkId::new("sequential", label(dims)), |b| {
            b.iter_batched(
                || system.clone(),
                |sys| black_box(sequential.reduce(sys)),
                BatchSize::LargeInput,
            );
        });
        group.bench_function(BenchmarkId::new("parallel", label(dims)), |b| {
            b.iter_batched(
                || system.clone(),
                |sys| black_box(parallel.reduce(sys)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(20);
    let solver = Solver::new(SolverConfig::default().with_verify(false));
    for dims in SIZES {
        let snap = snapshot(dims);
        group.bench_with_input(BenchmarkId::from_parameter(label(dims)), &snap, |b, s| {
            b.iter(|| black_box(solver.solve(black_box(s))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_reduce, bench_solve);
criterion_main!(benches);
