//! Snapshot capture and restore benchmarks.
//!
//! Measures taking the pointer-free snapshot of a populated forest and
//! rebuilding a forest from it, including validation of the stored links.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use dsf_benches::{
    error::BenchSetupError,
    params::ForestBenchParams,
    workload::{Workload, WorkloadConfig},
};
use dsf_core::DisjointSetForestBuilder;

/// Seed used for all workload generation in this benchmark.
const SEED: u64 = 7;

/// Forest sizes to benchmark.
const ELEMENT_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

fn snapshot_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("snapshot");
    group.sample_size(20);
    let builder = DisjointSetForestBuilder::new().with_rng_seed(SEED);

    for &element_count in ELEMENT_COUNTS {
        let workload = Workload::generate(&WorkloadConfig {
            element_count,
            merge_count: element_count / 2,
            seed: SEED,
        })?;
        let forest = workload.populate(&builder);
        let snapshot = forest.snapshot();
        let _restored = builder.restore(snapshot.clone())?;

        let params = ForestBenchParams {
            element_count,
            path_compression: builder.path_compression(),
        };

        group.bench_with_input(BenchmarkId::new("capture", params), &forest, |b, forest| {
            b.iter(|| forest.snapshot());
        });

        group.bench_with_input(
            BenchmarkId::new("restore", params),
            &snapshot,
            |b, snapshot| {
                b.iter_batched(
                    || snapshot.clone(),
                    |snapshot| builder.restore(snapshot),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
    Ok(())
}

fn snapshot_round_trip(c: &mut Criterion) {
    if let Err(err) = snapshot_impl(c) {
        panic!("snapshot benchmark setup failed: {err}");
    }
}

criterion_group!(benches, snapshot_round_trip);
criterion_main!(benches);
