#![no_main]

use libfuzzer_sys::fuzz_target;
use sift_core::{NO_MATCH, explain, matches, score};

// Input is `candidate \0 query`; without a separator the whole input is both.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (val, test) = text.split_once('\0').unwrap_or((text, text));

    let s = score(val, test);
    assert!(s == NO_MATCH || (0.0..=1.0).contains(&s), "score {s} out of range");
    assert_eq!(matches(val, test), s >= 0.0);

    if let Some(detail) = explain(val, test) {
        assert!((detail.score - s).abs() < 1e-12);
        assert!(detail.positions.windows(2).all(|w| w[0] < w[1]));
        assert!(detail.positions.iter().all(|&p| p < val.chars().count()));
    }
});
