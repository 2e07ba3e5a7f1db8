// benches/pipeline_bench.rs
// Criterion benchmarks for the likely-subtags pipeline:
//  - full build over the sample data (seed, closure stages, consistency, minimize, prune)
//  - batch maximize / minimize over a fixed query set
//  - pruned vs full table lookups
//
// Run with `cargo bench --bench pipeline`.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use likely_subtags::{LanguageTag, data::sample};
use std::hint::black_box;

const QUERIES: &[&str] = &[
    "und", "en", "zh", "zh_Hani", "zh-ZZZZ-SG", "zh_Hant_TW", "zh_TW", "sr", "sr_Latn",
    "sr_Latn_RS", "und_CH", "und_Latn_CH", "und_Hant", "und_Cyrl", "de_CH_1996", "fil",
    "fil_PH", "ko", "ja_JP", "iu", "xx", "xx_AQ", "xx_Latn_AQ", "und_AQ",
];

fn queries() -> Vec<LanguageTag> {
    QUERIES
        .iter()
        .filter_map(|q| LanguageTag::parse(q).ok())
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.bench_function("sample_standard", |b| {
        b.iter(|| black_box(sample::builder().build()).is_ok());
    });
    group.bench_function("sample_script_first", |b| {
        b.iter(|| black_box(sample::builder().favor_region(false).build()).is_ok());
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let Ok(report) = sample::builder().build() else {
        return;
    };
    let queries = queries();

    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("maximize_full", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(report.likely.maximize(black_box(q)));
            }
        });
    });
    group.bench_function("maximize_pruned", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(report.pruned.maximize(black_box(q)));
            }
        });
    });
    group.bench_function("minimize", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(report.likely.minimize(black_box(q)));
            }
        });
    });
    group.bench_function("parse_and_maximize", |b| {
        b.iter(|| {
            for q in QUERIES {
                let _ = black_box(report.likely.maximize_str(black_box(q)));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
