//! Criterion micro-benchmarks for public-index resolution.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use skein_bench::{probe_indices, reference_profile, stress_profile};
use skein_dataset::{AgentDataset, DatasetConfig, FrameDataset};

/// Benchmark: Build an agent dataset (mask load + compaction + hierarchy).
fn bench_build_agent_dataset(c: &mut Criterion) {
    let store = reference_profile(42).into_shared();

    c.bench_function("build_agent_dataset_reference", |b| {
        b.iter(|| {
            let ds = AgentDataset::new(DatasetConfig::default(), store.clone()).unwrap();
            black_box(ds.len());
        });
    });
}

/// Benchmark: Resolve 10K agent indices on the reference profile.
fn bench_get_agent_10k(c: &mut Criterion) {
    let ds = AgentDataset::new(DatasetConfig::default(), reference_profile(42).into_shared())
        .unwrap();
    let probes = probe_indices(ds.len(), 10_000, 7);

    c.bench_function("get_agent_10k_reference", |b| {
        b.iter(|| {
            for &i in &probes {
                black_box(ds.get(i).unwrap());
            }
        });
    });
}

/// Benchmark: Same as above at stress scale; cost should grow with log n.
fn bench_get_agent_10k_stress(c: &mut Criterion) {
    let ds =
        AgentDataset::new(DatasetConfig::default(), stress_profile(42).into_shared()).unwrap();
    let probes = probe_indices(ds.len(), 10_000, 7);

    c.bench_function("get_agent_10k_stress", |b| {
        b.iter(|| {
            for &i in &probes {
                black_box(ds.get(i).unwrap());
            }
        });
    });
}

/// Benchmark: Resolve 10K frame indices.
fn bench_get_frame_10k(c: &mut Criterion) {
    let ds = FrameDataset::new(DatasetConfig::default(), reference_profile(42).into_shared())
        .unwrap();
    let probes = probe_indices(ds.len(), 10_000, 11);

    c.bench_function("get_frame_10k_reference", |b| {
        b.iter(|| {
            for &i in &probes {
                black_box(ds.get(i).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_agent_dataset,
    bench_get_agent_10k,
    bench_get_agent_10k_stress,
    bench_get_frame_10k
);
criterion_main!(benches);
