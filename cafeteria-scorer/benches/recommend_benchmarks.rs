//! Criterion benchmarks for the recommendation pipeline.
//!
//! Measures aggregation plus ranking across corpus sizes to catch
//! regressions in the per-request path.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package cafeteria-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use cafeteria_core::{MenuKey, RatingSubmission};
use cafeteria_scorer::{Aggregator, RankLimit, RawPreferences, recommend};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Corpus sizes to benchmark, in submissions.
const CORPUS_SIZES: &[u32] = &[1_000, 10_000, 100_000];

/// Distinct menus spread across the corpus.
const MENU_COUNT: u32 = 250;

/// Build a deterministic corpus of `size` submissions scored inside 1..=5.
#[expect(
    clippy::float_arithmetic,
    reason = "scores are derived from the submission index"
)]
fn build_corpus(size: u32) -> Vec<RatingSubmission> {
    (0..size)
        .map(|index| {
            let menu = index.wrapping_mul(7_919).rem_euclid(MENU_COUNT);
            let venue = menu.rem_euclid(5);
            let spread = f64::from(index.rem_euclid(401)) / 100.0;
            RatingSubmission::new(MenuKey::new(format!("venue-{venue}"), format!("menu-{menu}")))
                .with_score("taste", 1.0 + spread)
                .with_score("portion", 5.0 - spread)
                .with_score("price", 1.0 + spread / 2.0)
        })
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let aggregator = Aggregator::default();
    let preferences = RawPreferences::new()
        .with("taste", 2.0)
        .with("portion", 1.0)
        .with("price", 1.0);

    for &size in CORPUS_SIZES {
        let corpus = build_corpus(size);
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("submissions", size), &corpus, |b, corpus| {
            b.iter(|| {
                black_box(recommend(
                    corpus,
                    &preferences,
                    &aggregator,
                    RankLimit::default(),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
