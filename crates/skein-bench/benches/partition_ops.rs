//! Criterion micro-benchmarks for scene partitioning and range queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use skein_bench::{reference_profile, sparse_profile};
use skein_core::RecordStore;
use skein_dataset::{AgentDataset, DatasetConfig};
use skein_index::HierarchicalIndex;

/// Benchmark: Derive a scene dataset for every scene of the reference profile.
fn bench_scene_dataset_all(c: &mut Criterion) {
    let ds = AgentDataset::new(DatasetConfig::default(), reference_profile(42).into_shared())
        .unwrap();
    let scenes = ds.view().scene_count();

    c.bench_function("scene_dataset_all_reference", |b| {
        b.iter(|| {
            for s in 0..scenes {
                black_box(ds.scene_dataset(s).unwrap().len());
            }
        });
    });
}

/// Benchmark: indices_in_scene over every scene of a sparse mask.
fn bench_indices_in_scene_sparse(c: &mut Criterion) {
    let ds =
        AgentDataset::new(DatasetConfig::default(), sparse_profile(42).into_shared()).unwrap();
    let scenes = ds.view().scene_count();

    c.bench_function("indices_in_scene_sparse", |b| {
        b.iter(|| {
            for s in 0..scenes {
                black_box(ds.indices_in_scene(s).unwrap());
            }
        });
    });
}

/// Benchmark: Full interval validation of the reference profile.
fn bench_validate_intervals(c: &mut Criterion) {
    let store = reference_profile(42);

    c.bench_function("validate_intervals_reference", |b| {
        b.iter(|| {
            HierarchicalIndex::validate(&store).unwrap();
            black_box(store.agent_count());
        });
    });
}

criterion_group!(
    benches,
    bench_scene_dataset_all,
    bench_indices_in_scene_sparse,
    bench_validate_intervals
);
criterion_main!(benches);
