#![no_main]

use libfuzzer_sys::fuzz_target;
use sift_core::rank_scored_by;

// Newline-separated labels; the first line is the query.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut lines = text.lines();
    let query = lines.next().unwrap_or_default();
    let labels: Vec<&str> = lines.collect();

    let ranked = rank_scored_by(labels.iter().copied(), |l| *l, query);
    assert_eq!(ranked.len(), labels.len());

    let mut seen: Vec<usize> = ranked.iter().map(|r| r.index).collect();
    seen.sort_unstable();
    assert!(seen.iter().copied().eq(0..labels.len()));

    for pair in ranked.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.is_match() || !b.is_match());
        if a.is_match() && b.is_match() {
            assert!(a.score <= b.score);
        }
    }
});
