//! Criterion benchmarks for the Morfo analyzer.
//!
//! Covers the hot path end to end: stem-index prefix lookup, surface
//! realization (cold and memoized) and the full path search over the
//! built-in graph and lexicon.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use morfo::turkish;

const WORDS: &[&str] = &[
    "kitaplara",
    "evlerine",
    "geliyorum",
    "anlıyor",
    "zeytinyağları",
    "kitapçığı",
    "bana",
    "sular",
    "gitti",
    "saatler",
];

fn bench_analyze(c: &mut Criterion) {
    let analyzer = turkish::analyzer().unwrap();

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Elements(WORDS.len() as u64));
    group.bench_function("word_batch", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(analyzer.analyze(black_box(word)));
            }
        })
    });
    group.bench_function("no_match", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box("xylophone"))))
    });
    group.finish();
}

fn bench_stem_lookup(c: &mut Criterion) {
    let analyzer = turkish::analyzer().unwrap();

    c.bench_function("stem_transitions_snapshot", |b| {
        b.iter(|| black_box(analyzer.stem_transitions()))
    });
}

criterion_group!(benches, bench_analyze, bench_stem_lookup);
criterion_main!(benches);
