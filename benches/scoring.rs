//! Scorer throughput benchmark
//!
//! Every breaker spends nearly all of its time inside `Scorer::score`, so
//! this is the number that bounds hill-climbing speed.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench scoring
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cryptanalysis::corpus::FrequencyTable;
use cryptanalysis::masker::Masker;
use cryptanalysis::score::{IocScorer, NgramScorer, Scorer};
use std::time::Duration;

const CORPUS: &str = include_str!("../tests/fixtures/corpus.txt");

fn reduced_corpus() -> String {
    Masker::new(CORPUS)
        .map(|m| m.reduce().to_string())
        .unwrap_or_default()
}

fn bench_ngram_orders(c: &mut Criterion) {
    let text = reduced_corpus();
    let mut group = c.benchmark_group("ngram_score");
    group.measurement_time(Duration::from_secs(5));

    for n in 1..=4 {
        let Ok(table) = FrequencyTable::from_corpus(CORPUS, n) else {
            continue;
        };
        let Ok(scorer) = NgramScorer::new(&table) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| black_box(scorer.score(black_box(text))));
        });
    }
    group.finish();
}

fn bench_ioc(c: &mut Criterion) {
    let text = reduced_corpus();
    let scorer = IocScorer::default();

    c.bench_function("ioc_score", |b| {
        b.iter(|| black_box(scorer.score(black_box(&text))));
    });
}

fn bench_masker(c: &mut Criterion) {
    c.bench_function("masker_reduce_extend", |b| {
        b.iter(|| {
            let masker = Masker::new(black_box(CORPUS));
            if let Ok(masker) = masker {
                black_box(masker.extend(masker.reduce()).ok());
            }
        });
    });
}

criterion_group!(benches, bench_ngram_orders, bench_ioc, bench_masker);
criterion_main!(benches);
