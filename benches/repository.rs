//! Benchmarks for the lazy resolution pipeline.
//!
//! Measures the cost model the library is built around:
//! - First-touch symbol loading versus cached repeat lookups
//! - Cold member resolution (slot scanning) versus warm cache probes
//! - Full namespace materialization via resolve-all
//! - Enum forward and reverse table lookups

extern crate introscope;

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use introscope::metadata::descriptor::NativeTypeId;
use introscope::metadata::provider::MemoryProvider;
use introscope::Repository;

/// A namespace with 100 classes of 30 methods each, plus one enum.
fn build_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_namespace("Bench", "1.0", &[]);
    for class_index in 0..100u32 {
        let class = provider.add_class(
            "Bench",
            &format!("Widget{class_index:03}"),
            NativeTypeId::new(u64::from(class_index) + 0x100),
        );
        for method_index in 0..30u32 {
            provider.add_method(class, &format!("action_{method_index:02}"));
        }
    }
    provider.add_enum(
        "Bench",
        "State",
        NativeTypeId::new(0x1000),
        &[("idle", 0), ("running", 1), ("stopped", 2), ("failed", 3)],
    );
    provider
}

/// Benchmark loading one symbol into a fresh repository every iteration.
fn bench_symbol_load_cold(c: &mut Criterion) {
    let provider = Arc::new(build_provider());

    c.bench_function("symbol_load_cold", |b| {
        b.iter(|| {
            let repository = Repository::new(provider.clone());
            let symbol = repository.lookup("Bench", black_box("Widget050")).unwrap();
            black_box(symbol)
        });
    });
}

/// Benchmark repeat lookups of an already-cached symbol.
fn bench_symbol_load_warm(c: &mut Criterion) {
    let provider = Arc::new(build_provider());
    let repository = Repository::new(provider);
    repository.lookup("Bench", "Widget050").unwrap();

    c.bench_function("symbol_load_warm", |b| {
        b.iter(|| {
            let symbol = repository.lookup("Bench", black_box("Widget050")).unwrap();
            black_box(symbol)
        });
    });
}

/// Benchmark resolving the last-declared method of a fresh compound, which
/// forces a full scan of the unresolved slot list.
fn bench_member_resolve_cold(c: &mut Criterion) {
    let provider = Arc::new(build_provider());

    c.bench_function("member_resolve_cold", |b| {
        b.iter(|| {
            let repository = Repository::new(provider.clone());
            let symbol = repository.lookup("Bench", "Widget050").unwrap().unwrap();
            let compound = symbol.as_compound().unwrap();
            let member = compound
                .resolve(repository.provider(), black_box("action_29"))
                .unwrap();
            black_box(member)
        });
    });
}

/// Benchmark probing a member that is already cached in its category.
fn bench_member_resolve_warm(c: &mut Criterion) {
    let provider = Arc::new(build_provider());
    let repository = Repository::new(provider);
    let symbol = repository.lookup("Bench", "Widget050").unwrap().unwrap();
    let compound = symbol.as_compound().unwrap().clone();
    compound.resolve(repository.provider(), "action_29").unwrap();

    c.bench_function("member_resolve_warm", |b| {
        b.iter(|| {
            let member = compound
                .resolve(repository.provider(), black_box("action_29"))
                .unwrap();
            black_box(member)
        });
    });
}

/// Benchmark forcing a whole namespace through the loader.
fn bench_resolve_all(c: &mut Criterion) {
    let provider = Arc::new(build_provider());

    c.bench_function("namespace_resolve_all", |b| {
        b.iter(|| {
            let repository = Repository::new(provider.clone());
            repository.resolve_all(black_box("Bench")).unwrap();
            black_box(repository.namespace("Bench"))
        });
    });
}

/// Benchmark enum forward and reverse lookups on a cached table.
fn bench_enum_lookups(c: &mut Criterion) {
    let provider = Arc::new(build_provider());
    let repository = Repository::new(provider);
    let symbol = repository.lookup("Bench", "State").unwrap().unwrap();
    let table = symbol.as_enum().unwrap().clone();

    c.bench_function("enum_forward_lookup", |b| {
        b.iter(|| black_box(table.get(black_box("RUNNING"))));
    });
    c.bench_function("enum_reverse_lookup", |b| {
        b.iter(|| black_box(table.name_of(black_box(2))));
    });
}

criterion_group!(
    benches,
    bench_symbol_load_cold,
    bench_symbol_load_warm,
    bench_member_resolve_cold,
    bench_member_resolve_warm,
    bench_resolve_all,
    bench_enum_lookups
);
criterion_main!(benches);
