use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mgl_core::{
    ancestor_plan, can_be_parent_lock, compatible, substitutable, validate_path, LockMode,
};

/// Every ordered pair of modes.
fn pairs() -> Vec<(LockMode, LockMode)> {
    LockMode::ALL
        .into_iter()
        .flat_map(|a| LockMode::ALL.into_iter().map(move |b| (a, b)))
        .collect()
}

fn bench_relations(c: &mut Criterion) {
    let pairs = pairs();
    let mut group = c.benchmark_group("relations");

    group.bench_function("compatible_all_pairs", |b| {
        b.iter(|| {
            for &(x, y) in &pairs {
                black_box(compatible(black_box(x), black_box(y)));
            }
        });
    });

    group.bench_function("can_be_parent_lock_all_pairs", |b| {
        b.iter(|| {
            for &(x, y) in &pairs {
                black_box(can_be_parent_lock(black_box(x), black_box(y)));
            }
        });
    });

    group.bench_function("substitutable_all_pairs", |b| {
        b.iter(|| {
            for &(x, y) in &pairs {
                black_box(substitutable(black_box(x), black_box(y)));
            }
        });
    });

    group.bench_function("join_all_pairs", |b| {
        b.iter(|| {
            for &(x, y) in &pairs {
                black_box(black_box(x).join(black_box(y)));
            }
        });
    });

    group.finish();
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    let mut path =
        ancestor_plan(LockMode::Exclusive, 7).expect("depth 7 is within the plan limit");
    path.push(LockMode::Exclusive);
    assert!(
        validate_path(&path).is_ok(),
        "benchmark path must be a valid lock path",
    );

    group.bench_function("validate_path_depth_8", |b| {
        b.iter(|| validate_path(black_box(&path)));
    });

    group.bench_function("ancestor_plan_depth_8", |b| {
        b.iter(|| ancestor_plan(black_box(LockMode::SharedIntentionExclusive), black_box(8)));
    });

    group.finish();
}

criterion_group!(benches, bench_relations, bench_hierarchy);
criterion_main!(benches);
