use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sift_core::{rank_by, score};

const WORDS: &[&str] = &[
    "open", "safari", "system", "settings", "terminal", "finder", "preview", "calendar", "music",
    "notes", "reminders", "activity", "monitor", "keychain", "access", "workflow",
];

/// Deterministic launcher-style titles: two or three words each.
fn synthetic_titles(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = WORDS[i % WORDS.len()];
            let b = WORDS[(i * 7 + 3) % WORDS.len()];
            if i % 3 == 0 {
                let c = WORDS[(i * 13 + 5) % WORDS.len()];
                format!("{a} {b} {c}")
            } else {
                format!("{a} {b}")
            }
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    for (val, test) in [
        ("System Settings", "sys"),
        ("Activity Monitor", "amon"),
        ("Keychain Access", "zzz"),
    ] {
        group.bench_with_input(BenchmarkId::new("single", test), &(val, test), |b, (v, t)| {
            b.iter(|| black_box(score(black_box(v), black_box(t))));
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for size in [10_usize, 100, 1000] {
        let titles = synthetic_titles(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("titles", size), &titles, |b, titles| {
            b.iter(|| black_box(rank_by(titles.iter(), |t| t.as_str(), "se")));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_score, bench_rank);
criterion_main!(benches);
