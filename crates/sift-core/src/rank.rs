//! Stable fuzzy ranking of labeled candidates.
//!
//! Every candidate is scored exactly once against the query, paired with its
//! input position, and stable-sorted by score (lower is better). Candidates
//! the query cannot match score [`NO_MATCH`] and sort after every matching
//! candidate. Ties, including the tie among non-matches, keep input order,
//! since callers usually hand over lists that are already ordered by
//! declaration or recency.
//!
//! Candidates are never mutated: scores live in [`Ranked`] wrappers built for
//! the sort and discarded afterwards.
//!
//! # Example
//!
//! ```
//! use sift_core::{rank, rank_matching};
//!
//! let items = vec!["xyz", "axybz", "abc"];
//! assert_eq!(rank(items.clone(), "ab"), vec!["abc", "axybz", "xyz"]);
//! assert_eq!(rank_matching(items, "ab"), vec!["abc", "axybz"]);
//! ```

use crate::score::{BEST_SCORE, MatchDetail, NO_MATCH, Scorer};
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use tracing::debug;

/// Anything with a display label the ranker can score.
pub trait Labeled {
    /// The text matched against the query.
    fn label(&self) -> &str;
}

impl Labeled for str {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for String {
    fn label(&self) -> &str {
        self
    }
}

impl Labeled for Cow<'_, str> {
    fn label(&self) -> &str {
        self
    }
}

impl<T: Labeled + ?Sized> Labeled for &T {
    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<T: Labeled + ?Sized> Labeled for Box<T> {
    fn label(&self) -> &str {
        (**self).label()
    }
}

/// A candidate with its score and its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// The candidate itself.
    pub item: T,

    /// Score against the query, or [`NO_MATCH`].
    pub score: f64,

    /// Zero-based position of the candidate in the input sequence.
    pub index: usize,
}

impl<T> Ranked<T> {
    /// Whether the query matched this candidate.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.score >= 0.0
    }
}

/// A ranked candidate together with the match behind its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explained<T> {
    pub item: T,

    /// Components and matched positions; `None` when the query does not match.
    pub detail: Option<MatchDetail>,

    /// Zero-based position of the candidate in the input sequence.
    pub index: usize,
}

impl<T> Explained<T> {
    /// Score against the query, or [`NO_MATCH`].
    #[must_use]
    pub fn score(&self) -> f64 {
        self.detail.as_ref().map_or(NO_MATCH, |detail| detail.score)
    }

    /// Whether the query matched this candidate.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.detail.is_some()
    }
}

/// Order two scores best-first, with every match ahead of every non-match.
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a >= 0.0, b >= 0.0) {
        (true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

impl Scorer {
    /// Rank `items` against `query`, keeping each item's score and input
    /// position.
    ///
    /// Non-matching items are kept, scored [`NO_MATCH`], and placed last. With
    /// an empty query nothing is scored and every item gets [`BEST_SCORE`] in
    /// input order.
    pub fn rank_scored_by<I, F>(&self, items: I, label_of: F, query: &str) -> Vec<Ranked<I::Item>>
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> &str,
    {
        if query.is_empty() {
            return items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Ranked {
                    item,
                    score: BEST_SCORE,
                    index,
                })
                .collect();
        }

        let mut ranked: Vec<Ranked<I::Item>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let score = self.score(label_of(&item), query);
                Ranked { item, score, index }
            })
            .collect();

        debug!(candidates = ranked.len(), query, "fuzzy ranking");

        // `sort_by` is stable: equal scores keep input order.
        ranked.sort_by(|a, b| compare_scores(a.score, b.score));
        ranked
    }

    /// [`Scorer::rank_scored_by`], keeping the full [`MatchDetail`] of each
    /// candidate instead of only its score.
    pub fn rank_explained_by<I, F>(
        &self,
        items: I,
        label_of: F,
        query: &str,
    ) -> Vec<Explained<I::Item>>
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> &str,
    {
        if query.is_empty() {
            return items
                .into_iter()
                .enumerate()
                .map(|(index, item)| Explained {
                    item,
                    detail: Some(MatchDetail::trivial()),
                    index,
                })
                .collect();
        }

        let mut ranked: Vec<Explained<I::Item>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let detail = self.explain(label_of(&item), query);
                Explained {
                    item,
                    detail,
                    index,
                }
            })
            .collect();

        debug!(candidates = ranked.len(), query, "fuzzy ranking with detail");

        ranked.sort_by(|a, b| compare_scores(a.score(), b.score()));
        ranked
    }

    /// Rank `items` best-first against `query`; the output is a permutation of
    /// the input.
    ///
    /// An empty query returns the input order unchanged.
    pub fn rank_by<I, F>(&self, items: I, label_of: F, query: &str) -> Vec<I::Item>
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> &str,
    {
        if query.is_empty() {
            debug!("empty query; keeping input order");
            return items.into_iter().collect();
        }

        self.rank_scored_by(items, label_of, query)
            .into_iter()
            .map(|ranked| ranked.item)
            .collect()
    }

    /// Drop the items `query` cannot match, then rank the rest best-first.
    pub fn rank_matching_by<I, F>(&self, items: I, label_of: F, query: &str) -> Vec<I::Item>
    where
        I: IntoIterator,
        F: Fn(&I::Item) -> &str,
    {
        self.rank_scored_by(items, label_of, query)
            .into_iter()
            .filter(Ranked::is_match)
            .map(|ranked| ranked.item)
            .collect()
    }

    /// [`Scorer::rank_by`] for items that carry their own label.
    pub fn rank<I>(&self, items: I, query: &str) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::Item: Labeled,
    {
        self.rank_by(items, <I::Item as Labeled>::label, query)
    }

    /// [`Scorer::rank_matching_by`] for items that carry their own label.
    pub fn rank_matching<I>(&self, items: I, query: &str) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::Item: Labeled,
    {
        self.rank_matching_by(items, <I::Item as Labeled>::label, query)
    }
}

/// [`Scorer::rank_scored_by`] with the default weights.
pub fn rank_scored_by<I, F>(items: I, label_of: F, query: &str) -> Vec<Ranked<I::Item>>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> &str,
{
    Scorer::default().rank_scored_by(items, label_of, query)
}

/// [`Scorer::rank_explained_by`] with the default weights.
pub fn rank_explained_by<I, F>(items: I, label_of: F, query: &str) -> Vec<Explained<I::Item>>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> &str,
{
    Scorer::default().rank_explained_by(items, label_of, query)
}

/// [`Scorer::rank_by`] with the default weights.
pub fn rank_by<I, F>(items: I, label_of: F, query: &str) -> Vec<I::Item>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> &str,
{
    Scorer::default().rank_by(items, label_of, query)
}

/// [`Scorer::rank_matching_by`] with the default weights.
pub fn rank_matching_by<I, F>(items: I, label_of: F, query: &str) -> Vec<I::Item>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> &str,
{
    Scorer::default().rank_matching_by(items, label_of, query)
}

/// [`Scorer::rank`] with the default weights.
pub fn rank<I>(items: I, query: &str) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Labeled,
{
    Scorer::default().rank(items, query)
}

/// [`Scorer::rank_matching`] with the default weights.
pub fn rank_matching<I>(items: I, query: &str) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Labeled,
{
    Scorer::default().rank_matching(items, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Weights;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        uid: u32,
        title: String,
    }

    fn item(uid: u32, title: &str) -> Item {
        Item {
            uid,
            title: title.to_string(),
        }
    }

    fn uids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.uid).collect()
    }

    // -----------------------------------------------------------------------
    // compare_scores
    // -----------------------------------------------------------------------

    #[test]
    fn matches_sort_before_no_match() {
        assert_eq!(compare_scores(0.9, NO_MATCH), Ordering::Less);
        assert_eq!(compare_scores(NO_MATCH, 0.0), Ordering::Greater);
        assert_eq!(compare_scores(NO_MATCH, NO_MATCH), Ordering::Equal);
        assert_eq!(compare_scores(0.1, 0.2), Ordering::Less);
    }

    // -----------------------------------------------------------------------
    // rank_by
    // -----------------------------------------------------------------------

    #[test]
    fn rank_orders_prefix_before_scattered_before_no_match() {
        let ranked = rank(vec!["xyz", "axybz", "abc"], "ab");
        assert_eq!(ranked, vec!["abc", "axybz", "xyz"]);
    }

    #[test]
    fn rank_empty_items() {
        let ranked = rank(Vec::<String>::new(), "ab");
        assert!(ranked.is_empty());
    }

    #[test]
    fn rank_by_is_stable_for_equal_labels() {
        let items = vec![
            item(1, "deploy"),
            item(2, "develop"),
            item(3, "deploy"),
            item(4, "deploy"),
        ];
        let ranked = rank_by(items, |i| i.title.as_str(), "dep");
        assert_eq!(uids(&ranked), vec![1, 3, 4, 2]);
    }

    #[test]
    fn rank_by_keeps_no_match_items_in_input_order() {
        let items = vec![item(1, "zzz"), item(2, "abc"), item(3, "yyy")];
        let ranked = rank_by(items, |i| i.title.as_str(), "ab");
        assert_eq!(uids(&ranked), vec![2, 1, 3]);
    }

    #[test]
    fn rank_by_empty_query_preserves_order() {
        let items = vec![item(3, "c"), item(1, "a"), item(2, "b")];
        let ranked = rank_by(items, |i| i.title.as_str(), "");
        assert_eq!(uids(&ranked), vec![3, 1, 2]);
    }

    #[test]
    fn rank_by_works_on_borrowed_slices() {
        let items = [item(1, "axybz"), item(2, "abc")];
        let ranked = rank_by(items.iter(), |i| i.title.as_str(), "ab");
        assert_eq!(ranked[0].uid, 2);
        assert_eq!(ranked[1].uid, 1);
        // caller's items are untouched
        assert_eq!(items[0].title, "axybz");
    }

    #[test]
    fn rank_by_is_case_insensitive() {
        let ranked = rank(vec!["Safari", "SAFE", "sa"], "SA");
        assert_eq!(ranked, vec!["sa", "SAFE", "Safari"]);
    }

    // -----------------------------------------------------------------------
    // rank_matching_by
    // -----------------------------------------------------------------------

    #[test]
    fn rank_matching_drops_non_matches() {
        let ranked = rank_matching(vec!["xyz", "axybz", "abc"], "ab");
        assert_eq!(ranked, vec!["abc", "axybz"]);
    }

    #[test]
    fn rank_matching_with_empty_query_keeps_everything() {
        let ranked = rank_matching(vec!["b", "a"], "");
        assert_eq!(ranked, vec!["b", "a"]);
    }

    #[test]
    fn rank_matching_can_return_nothing() {
        let ranked = rank_matching(vec!["xyz", "uvw"], "ab");
        assert!(ranked.is_empty());
    }

    // -----------------------------------------------------------------------
    // rank_scored_by
    // -----------------------------------------------------------------------

    #[test]
    fn rank_scored_by_reports_scores_and_indices() {
        let ranked = rank_scored_by(vec!["xyz", "axybz", "abc"], |s| *s, "ab");

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].item, "abc");
        assert_eq!(ranked[0].index, 2);
        assert!((ranked[0].score - 0.1).abs() < 1e-9);
        assert!(ranked[0].is_match());

        assert_eq!(ranked[1].item, "axybz");
        assert_eq!(ranked[1].index, 1);

        assert_eq!(ranked[2].item, "xyz");
        assert_eq!(ranked[2].index, 0);
        assert_eq!(ranked[2].score, NO_MATCH);
        assert!(!ranked[2].is_match());
    }

    #[test]
    fn rank_scored_by_empty_query_scores_best() {
        let ranked = rank_scored_by(vec!["b", "a"], |s| *s, "");
        assert!(ranked.iter().all(|r| r.score == BEST_SCORE));
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn rank_explained_by_agrees_with_rank_scored_by() {
        let items = vec!["xyz", "axybz", "abc", "abc"];
        let scored = rank_scored_by(items.clone(), |s| *s, "ab");
        let explained = rank_explained_by(items, |s| *s, "ab");

        let scored_order: Vec<usize> = scored.iter().map(|r| r.index).collect();
        let explained_order: Vec<usize> = explained.iter().map(|r| r.index).collect();
        assert_eq!(scored_order, explained_order);
        for (s, e) in scored.iter().zip(&explained) {
            assert_eq!(s.score, e.score());
            assert_eq!(s.is_match(), e.is_match());
        }
    }

    #[test]
    fn rank_explained_by_carries_positions() {
        let explained = rank_explained_by(vec!["xyz", "axybz"], |s| *s, "ab");
        assert_eq!(explained[0].item, "axybz");
        let detail = explained[0].detail.as_ref().expect("axybz matches");
        assert_eq!(detail.positions, vec![0, 3]);
        assert!(explained[1].detail.is_none());
        assert_eq!(explained[1].score(), NO_MATCH);
    }

    #[test]
    fn rank_explained_by_empty_query_keeps_order() {
        let explained = rank_explained_by(vec!["b", "a"], |s| *s, "");
        assert_eq!(explained[0].item, "b");
        assert!(explained.iter().all(|r| r.score() == BEST_SCORE));
    }

    // -----------------------------------------------------------------------
    // Scorer methods
    // -----------------------------------------------------------------------

    #[test]
    fn custom_scorer_can_reorder() {
        // "xxab" starts later but covers more of itself than "abxxxxxx".
        let coverage_heavy = Scorer::new(Weights {
            start: 0.0,
            compactness: 0.0,
            coverage: 1.0,
        })
        .expect("valid weights");

        let items = vec!["abxxxxxx", "xxab"];
        assert_eq!(
            Scorer::default().rank(items.clone(), "ab"),
            vec!["abxxxxxx", "xxab"]
        );
        assert_eq!(coverage_heavy.rank(items, "ab"), vec!["xxab", "abxxxxxx"]);
    }

    #[test]
    fn labeled_impls() {
        let owned = String::from("abc");
        let boxed: Box<str> = "abc".into();
        let cow: Cow<'_, str> = Cow::Borrowed("abc");
        assert_eq!(owned.label(), "abc");
        assert_eq!(boxed.label(), "abc");
        assert_eq!(cow.label(), "abc");
    }
}
