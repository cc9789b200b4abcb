//! Integration tests for ranking launcher-style item lists.

use sift_core::{
    NO_MATCH, Ranked, Scorer, Weights, explain, rank_by, rank_matching_by, rank_scored_by,
};

#[derive(Debug, Clone, PartialEq)]
struct MenuItem {
    uid: &'static str,
    title: &'static str,
}

fn menu() -> Vec<MenuItem> {
    [
        ("kw-xyz", "xyz"),
        ("kw-axybz", "axybz"),
        ("kw-abc", "abc"),
        ("kw-safari", "Open Safari"),
        ("kw-settings", "System Settings"),
        ("kw-abc-dup", "abc"),
    ]
    .into_iter()
    .map(|(uid, title)| MenuItem { uid, title })
    .collect()
}

fn uids(items: &[MenuItem]) -> Vec<&'static str> {
    items.iter().map(|i| i.uid).collect()
}

#[test]
fn ranks_compact_prefix_before_scattered_before_no_match() {
    let ranked = rank_by(menu(), |i| i.title, "ab");
    assert_eq!(
        uids(&ranked),
        vec![
            "kw-abc",
            "kw-abc-dup",
            "kw-axybz",
            "kw-xyz",
            "kw-safari",
            "kw-settings",
        ]
    );
}

#[test]
fn dropping_unmatched_keeps_only_matches() {
    let ranked = rank_matching_by(menu(), |i| i.title, "ab");
    assert_eq!(uids(&ranked), vec!["kw-abc", "kw-abc-dup", "kw-axybz"]);
}

#[test]
fn empty_query_keeps_declaration_order() {
    let ranked = rank_by(menu(), |i| i.title, "");
    assert_eq!(ranked, menu());
}

#[test]
fn empty_input_ranks_to_empty() {
    let ranked = rank_by(Vec::<MenuItem>::new(), |i| i.title, "anything");
    assert!(ranked.is_empty());
}

#[test]
fn no_match_items_carry_sentinel() {
    let items = menu();
    let ranked: Vec<Ranked<&MenuItem>> = rank_scored_by(&items, |i| i.title, "ab");
    let tail: Vec<_> = ranked.iter().skip(3).collect();
    assert!(tail.iter().all(|r| r.score == NO_MATCH));
    assert!(ranked.iter().take(3).all(Ranked::is_match));
}

#[test]
fn greedy_match_binds_earliest_chars() {
    // `sse` binds s(0) s(2) e(4) inside "System", never reaching "Settings".
    let detail = explain("System Settings", "sse").expect("should match");
    assert_eq!(detail.positions, vec![0, 2, 4]);
    assert!(detail.score > 0.0);
}

#[test]
fn scorer_with_config_weights_is_consistent_across_calls() {
    let scorer = Scorer::new(Weights {
        start: 0.1,
        compactness: 0.6,
        coverage: 0.3,
    })
    .expect("valid weights");

    let first = scorer.score("Open Safari", "saf");
    let second = scorer.score("Open Safari", "saf");
    assert_eq!(first, second);

    let ranked = scorer.rank_by(menu(), |i| i.title, "set");
    assert_eq!(ranked[0].uid, "kw-settings");
}
