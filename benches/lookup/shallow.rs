//! Flat-map benchmarks: single marker lookups at the start, middle and end of
//! the insertion order, and the triple-marker fetch, across filler sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lookup_benchmarks::fetch::{
    fetch_markers_dynamic, fetch_markers_static, shallow_fetch_dynamic, shallow_fetch_static,
    TARGET_MARKERS,
};
use lookup_benchmarks::fixtures::{ShallowFixtures, DEFAULT_MARKER_COUNT};

const FILLER_COUNTS: [usize; 3] = [10, 100, 1_000];

fn shallow_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("shallow/single");
    group.throughput(Throughput::Elements(1));

    for fillers in FILLER_COUNTS {
        let fixtures = ShallowFixtures::build(DEFAULT_MARKER_COUNT, fillers);
        for marker in TARGET_MARKERS {
            let param = format!("{}/{}", marker, fillers);
            group.bench_function(BenchmarkId::new("dynamic", &param), |b| {
                b.iter(|| shallow_fetch_dynamic(black_box(&fixtures.dynamic), marker));
            });
            group.bench_function(BenchmarkId::new("static", &param), |b| {
                b.iter(|| shallow_fetch_static(black_box(&fixtures.typed), marker));
            });
        }
    }
    group.finish();
}

fn shallow_markers(c: &mut Criterion) {
    let mut group = c.benchmark_group("shallow/markers");
    group.throughput(Throughput::Elements(TARGET_MARKERS.len() as u64));

    for fillers in FILLER_COUNTS {
        let fixtures = ShallowFixtures::build(DEFAULT_MARKER_COUNT, fillers);
        group.bench_function(BenchmarkId::new("dynamic", fillers), |b| {
            b.iter(|| fetch_markers_dynamic(black_box(&fixtures.dynamic)));
        });
        group.bench_function(BenchmarkId::new("static", fillers), |b| {
            b.iter(|| fetch_markers_static(black_box(&fixtures.typed)));
        });
    }
    group.finish();
}

criterion_group!(benches, shallow_single, shallow_markers);
criterion_main!(benches);
