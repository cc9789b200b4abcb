//! Fuzzy subsequence scoring.
//!
//! A query fragment matches a candidate when its characters appear, in order
//! and ignoring case, somewhere in the candidate. Matching characters are
//! located greedily: the first query character binds to its earliest
//! occurrence, and every following character binds to the earliest occurrence
//! after the previous binding. There is no backtracking.
//!
//! # Score composition
//!
//! A successful match is described by three components in `[0, 1]`, where `1`
//! is ideal. With `n` the candidate length and `m` the query length (both in
//! lowercased `char`s):
//!
//! | Component     | Formula                          | Default weight |
//! |---------------|----------------------------------|----------------|
//! | `start`       | `1 - first / n`                  | 0.20           |
//! | `compactness` | `max(1 - separation / m, 0)`     | 0.50           |
//! | `coverage`    | `m / n`                          | 0.30           |
//!
//! `first` is the zero-based index of the first matched character and
//! `separation` is the total number of candidate characters skipped between
//! consecutive matched characters.
//!
//! The weighted sum is a quality in `[0, 1]`; the score is `1 - quality`, so
//! lower is better:
//!
//! ```text
//! 0.0        exact, contiguous match at the start of the candidate
//! (0, 1]     progressively worse matches
//! -1.0       NO_MATCH
//! ```
//!
//! # Example
//!
//! ```
//! use sift_core::{NO_MATCH, matches, score};
//!
//! assert!(score("Hello", "hello").abs() < 1e-9);
//! assert!(score("abc", "ab") < score("axybz", "ab"));
//! assert_eq!(score("xyz", "ab"), NO_MATCH);
//! assert!(matches("anything", ""));
//! ```

use crate::error::WeightsError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Sentinel score for a candidate the query cannot match at all.
pub const NO_MATCH: f64 = -1.0;

/// Best attainable score: exact match, or an empty query.
pub const BEST_SCORE: f64 = 0.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weights of the three score components.
///
/// Loaded from the `[scoring]` section of the config file. Weights must be
/// finite, non-negative, and sum to `1.0`; see [`Weights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Weight of the start-position component (default 0.20).
    #[serde(default = "default_start_weight")]
    pub start: f64,

    /// Weight of the compactness component (default 0.50).
    #[serde(default = "default_compactness_weight")]
    pub compactness: f64,

    /// Weight of the coverage component (default 0.30).
    #[serde(default = "default_coverage_weight")]
    pub coverage: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            start: default_start_weight(),
            compactness: default_compactness_weight(),
            coverage: default_coverage_weight(),
        }
    }
}

impl Weights {
    /// Check that every weight is finite and non-negative and that they sum
    /// to `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError::OutOfRange`] for the first offending weight, or
    /// [`WeightsError::BadSum`] when the sum is off by more than `1e-6`.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("start", self.start),
            ("compactness", self.compactness),
            ("coverage", self.coverage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::OutOfRange { name, value });
            }
        }

        let sum = self.start + self.compactness + self.coverage;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum { sum });
        }

        Ok(())
    }
}

const fn default_start_weight() -> f64 {
    0.20
}

const fn default_compactness_weight() -> f64 {
    0.50
}

const fn default_coverage_weight() -> f64 {
    0.30
}

/// Breakdown of one successful match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    /// Final score in `[0, 1]`, lower is better.
    pub score: f64,

    /// Start-position component in `[0, 1]`.
    pub start: f64,

    /// Compactness component in `[0, 1]`.
    pub compactness: f64,

    /// Coverage component in `[0, 1]`.
    pub coverage: f64,

    /// Indices (in `char`s of the original candidate) of the matched
    /// characters, ascending. Empty for an empty query.
    pub positions: Vec<usize>,
}

impl MatchDetail {
    /// An empty query matches everything with every component ideal.
    pub(crate) const fn trivial() -> Self {
        Self {
            score: BEST_SCORE,
            start: 1.0,
            compactness: 1.0,
            coverage: 1.0,
            positions: Vec::new(),
        }
    }
}

/// Fuzzy scorer with a fixed weight vector.
///
/// `Scorer::default()` uses the default weights. The weights never change
/// between calls, so scores from one scorer are always comparable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scorer {
    weights: Weights,
}

impl Scorer {
    /// Build a scorer with custom weights.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] if the weights fail [`Weights::validate`].
    pub fn new(weights: Weights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// The weights this scorer applies.
    #[must_use]
    pub const fn weights(&self) -> Weights {
        self.weights
    }

    /// Score `test` against `val`: `0.0` is best, [`NO_MATCH`] means no match.
    #[must_use]
    pub fn score(&self, val: &str, test: &str) -> f64 {
        self.explain(val, test).map_or(NO_MATCH, |detail| detail.score)
    }

    /// Whether `test` fuzzy-matches `val` at all.
    #[must_use]
    pub fn matches(&self, val: &str, test: &str) -> bool {
        self.explain(val, test).is_some()
    }

    /// Score `test` against `val` and return the full breakdown, or `None`
    /// when there is no match.
    #[must_use]
    pub fn explain(&self, val: &str, test: &str) -> Option<MatchDetail> {
        if test.is_empty() {
            return Some(MatchDetail::trivial());
        }

        let (haystack, origin) = lowercase_with_origin(val);
        let needle: Vec<char> = test.chars().flat_map(char::to_lowercase).collect();

        let Some(matched) = greedy_positions(&haystack, &needle) else {
            trace!(candidate = val, query = test, "no match");
            return None;
        };

        let detail = self.compose(&matched, haystack.len(), needle.len(), &origin);
        trace!(
            candidate = val,
            query = test,
            score = detail.score,
            "scored candidate"
        );
        Some(detail)
    }

    /// Combine greedy match positions into a weighted score.
    ///
    /// `matched` is non-empty and strictly increasing, so `needle_len <=
    /// haystack_len` and both are non-zero.
    #[allow(clippy::cast_precision_loss)]
    fn compose(
        &self,
        matched: &[usize],
        haystack_len: usize,
        needle_len: usize,
        origin: &[usize],
    ) -> MatchDetail {
        let n = haystack_len as f64;
        let m = needle_len as f64;

        let first = matched.first().copied().unwrap_or(0);
        let separation: usize = matched.windows(2).map(|w| w[1] - w[0] - 1).sum();

        let start = 1.0 - first as f64 / n;
        let compactness = (1.0 - separation as f64 / m).max(0.0);
        let coverage = m / n;

        let quality = self.weights.start * start
            + self.weights.compactness * compactness
            + self.weights.coverage * coverage;

        let mut positions: Vec<usize> = matched.iter().map(|&i| origin[i]).collect();
        positions.dedup();

        MatchDetail {
            score: (1.0 - quality).clamp(BEST_SCORE, 1.0),
            start,
            compactness,
            coverage,
            positions,
        }
    }
}

/// Lowercase `val`, remembering which original `char` each lowered `char`
/// came from. Some characters lowercase to more than one `char`.
fn lowercase_with_origin(val: &str) -> (Vec<char>, Vec<usize>) {
    val.chars()
        .enumerate()
        .flat_map(|(idx, c)| c.to_lowercase().map(move |lower| (lower, idx)))
        .unzip()
}

/// Greedy earliest-position subsequence search.
///
/// Returns the index in `haystack` of every `needle` character, or `None` as
/// soon as one cannot be found after the previous match.
fn greedy_positions(haystack: &[char], needle: &[char]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(needle.len());
    let mut from = 0;

    for &c in needle {
        let offset = haystack.get(from..)?.iter().position(|&h| h == c)?;
        positions.push(from + offset);
        from += offset + 1;
    }

    Some(positions)
}

/// [`Scorer::score`] with the default weights.
#[must_use]
pub fn score(val: &str, test: &str) -> f64 {
    Scorer::default().score(val, test)
}

/// [`Scorer::matches`] with the default weights.
#[must_use]
pub fn matches(val: &str, test: &str) -> bool {
    Scorer::default().matches(val, test)
}

/// [`Scorer::explain`] with the default weights.
#[must_use]
pub fn explain(val: &str, test: &str) -> Option<MatchDetail> {
    Scorer::default().explain(val, test)
}
