//! Merge, lookup, and removal benchmarks.
//!
//! Builds seeded forests of increasing size and measures replaying the merge
//! workload, answering co-membership queries, enumerating a set, and removing
//! a bounded sample of elements, with and without path compression.
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
const SEED: u64 = 42;

/// Forest sizes to benchmark.
const ELEMENT_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

/// Elements removed per iteration of the removal benchmark.
const REMOVAL_SAMPLE: usize = 64;

fn workload(element_count: usize) -> Result<Workload, BenchSetupError> {
    Workload::generate(&WorkloadConfig {
        element_count,
        merge_count: element_count.saturating_mul(3) / 4,
        seed: SEED,
    })
}

fn forest_ops_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("forest");
    group.sample_size(20);

    for &element_count in ELEMENT_COUNTS {
        let workload = workload(element_count)?;
        for path_compression in [true, false] {
            let params = ForestBenchParams {
                element_count,
                path_compression,
            };
            let builder = DisjointSetForestBuilder::new()
                .with_rng_seed(SEED)
                .with_path_compression(path_compression);

            group.bench_with_input(
                BenchmarkId::new("populate", params),
                &(&workload, &builder),
                |b, &(workload, builder)| b.iter(|| workload.populate(builder)),
            );

            group.bench_with_input(
                BenchmarkId::new("are_comembers", params),
                &(&workload, &builder),
                |b, &(workload, builder)| {
                    b.iter_batched(
                        || workload.populate(builder),
                        |mut forest| {
                            workload
                                .merges()
                                .iter()
                                .filter(|(left, right)| {
                                    forest.are_comembers(left, right).as_bool() == Some(true)
                                })
                                .count()
                        },
                        BatchSize::LargeInput,
                    );
                },
            );

            group.bench_with_input(
                BenchmarkId::new("find_set", params),
                &(&workload, &builder),
                |b, &(workload, builder)| {
                    b.iter_batched(
                        || workload.populate(builder),
                        |mut forest| {
                            workload
                                .elements()
                                .first()
                                .and_then(|id| forest.find_set(id))
                        },
                        BatchSize::LargeInput,
                    );
                },
            );

            let targets = workload.removal_targets(REMOVAL_SAMPLE);
            group.bench_with_input(
                BenchmarkId::new("remove_sample", params),
                &(&workload, &builder, &targets),
                |b, &(workload, builder, targets)| {
                    b.iter_batched(
                        || workload.populate(builder),
                        |mut forest| {
                            for id in targets {
                                forest.remove(id);
                            }
                            forest
                        },
                        BatchSize::LargeInput,
                    );
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn forest_ops(c: &mut Criterion) {
    if let Err(err) = forest_ops_impl(c) {
        panic!("forest benchmark setup failed: {err}");
    }
}

criterion_group!(benches, forest_ops);
criterion_main!(benches);
