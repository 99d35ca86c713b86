use criterion::{black_box, criterion_group, criterion_main, Criterion};
use live_router::PatternIndex;

const NAMESPACES: usize = 64;
const METRICS_PER_NAMESPACE: usize = 32;

fn build_index() -> PatternIndex<usize> {
    let mut index = PatternIndex::new();
    let mut payload = 0;
    for namespace in 0..NAMESPACES {
        for metric in 0..METRICS_PER_NAMESPACE {
            index
                .insert(&format!("stream/ns-{namespace}/metric-{metric}"), payload)
                .expect("benchmark pattern should be valid");
            payload += 1;
        }
        index
            .insert(&format!("stream/ns-{namespace}/*"), payload)
            .expect("benchmark pattern should be valid");
        payload += 1;
    }
    index
        .insert("stream/*/**", payload)
        .expect("benchmark pattern should be valid");
    index
}

fn pattern_lookup_criterion(c: &mut Criterion) {
    let index = build_index();

    let mut group = c.benchmark_group("pattern_lookup");
    group.bench_function("exact", |b| {
        b.iter(|| black_box(index.lookup(black_box("stream/ns-17/metric-9"))));
    });
    group.bench_function("single_segment_wildcard", |b| {
        b.iter(|| black_box(index.lookup(black_box("stream/ns-17/unknown"))));
    });
    group.bench_function("remainder_wildcard", |b| {
        b.iter(|| black_box(index.lookup(black_box("stream/ns-99/a/b/c"))));
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(index.lookup(black_box("plugin/testdata/random"))));
    });
    group.finish();
}

criterion_group!(benches, pattern_lookup_criterion);
criterion_main!(benches);
