//! Word Locator Benchmarks
//!
//! Locating search hits on long OCR pages, where common words have hundreds
//! of candidates and context decides between them.
//!
//! Run with: `cargo bench --bench locate_performance`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use iiif_text_server::text::{locate, PhraseMatch, UniqueWords, Word, WordBox};

const VOCABULARY: [&str; 12] = [
    "the", "letter", "of", "sir", "and", "to", "my", "dear", "friend", "in", "Rome", "we",
];

/// A page of `count` words cycling through a small vocabulary
fn page(count: usize) -> Vec<Word> {
    (0..count)
        .map(|idx| {
            let text = VOCABULARY[(idx * 7 + idx / 13) % VOCABULARY.len()];
            let bounds = WordBox::new((idx % 20) as u32 * 60, (idx / 20) as u32 * 30, 55, 25);
            Word::new(text, idx, bounds)
        })
        .collect()
}

/// A phrase match taken from the middle of the page, with context
fn phrase_from(words: &[Word], at: usize, context: usize) -> PhraseMatch {
    let join = |range: std::ops::Range<usize>| {
        words[range]
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };

    PhraseMatch::new(
        "bench",
        join(at..at + 2),
        join(at - context..at),
        join(at + 2..at + 2 + context),
    )
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.measurement_time(Duration::from_secs(10));

    for count in [500, 2_000, 10_000] {
        let words = page(count);
        let phrase = phrase_from(&words, count / 2, 5);

        group.bench_with_input(BenchmarkId::new("with_context", count), &words, |b, words| {
            b.iter(|| black_box(locate(black_box(words), black_box(&phrase))))
        });

        let bare = PhraseMatch::new("bench", "the", "", "");
        group.bench_with_input(BenchmarkId::new("empty_context", count), &words, |b, words| {
            b.iter(|| black_box(locate(black_box(words), black_box(&bare))))
        });
    }

    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let words = page(2_000);
    let phrases: Vec<PhraseMatch> = (100..1_900)
        .step_by(50)
        .map(|at| phrase_from(&words, at, 3))
        .collect();

    c.bench_function("locate_and_dedup_36_hits", |b| {
        b.iter(|| {
            let mut unique = UniqueWords::new();
            for phrase in &phrases {
                for word in locate(&words, phrase) {
                    unique.insert(word);
                }
            }
            black_box(unique.len())
        })
    });
}

criterion_group!(benches, bench_locate, bench_dedup);
criterion_main!(benches);
