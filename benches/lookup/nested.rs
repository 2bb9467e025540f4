//! Nested lookup benchmarks: every traversal accessor on the full and the
//! minimal movie fixtures.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lookup_benchmarks::fetch::{shallow_fetch_dynamic, shallow_fetch_static};
use lookup_benchmarks::fixtures::{
    build_nested_fixtures, NestedFixtures, MEDIA_TYPES_KEY, MINIMAL_MOVIES,
};
use lookup_benchmarks::Accessor;

fn nested_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested/traversal");
    group.throughput(Throughput::Elements(1));

    let fixtures = [
        ("full", build_nested_fixtures()),
        ("minimal", NestedFixtures::from_movies(&MINIMAL_MOVIES)),
    ];
    for (size, fixture) in &fixtures {
        assert!(fixture.is_consistent(), "{} fixtures diverge", size);
        for accessor in Accessor::ALL {
            group.bench_function(BenchmarkId::new(accessor.name(), size), |b| {
                b.iter(|| accessor.fetch(black_box(fixture)));
            });
        }
    }
    group.finish();
}

fn nested_shallow(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested/shallow");
    group.throughput(Throughput::Elements(1));

    let fixtures = build_nested_fixtures();
    group.bench_function("dynamic", |b| {
        b.iter(|| shallow_fetch_dynamic(black_box(&fixtures.dynamic), MEDIA_TYPES_KEY));
    });
    group.bench_function("static", |b| {
        b.iter(|| shallow_fetch_static(black_box(&fixtures.typed), MEDIA_TYPES_KEY));
    });
    group.finish();
}

criterion_group!(benches, nested_traversal, nested_shallow);
criterion_main!(benches);
