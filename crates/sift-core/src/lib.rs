#![forbid(unsafe_code)]
//! sift-core library.
//!
//! Fuzzy subsequence scoring ([`score`]) and stable ranking ([`rank`]) of
//! labeled candidates against a typed query fragment.
//!
//! # Conventions
//!
//! - **Scores**: lower is better. `0.0` is an exact, contiguous match at the
//!   start of the candidate; [`NO_MATCH`] (`-1.0`) means no match at all.
//! - **Errors**: Library errors are `thiserror` enums; binaries wrap them in
//!   `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod rank;
pub mod score;

pub use rank::{
    Explained, Labeled, Ranked, rank, rank_by, rank_explained_by, rank_matching, rank_matching_by,
    rank_scored_by,
};
pub use score::{BEST_SCORE, MatchDetail, NO_MATCH, Scorer, Weights, explain, matches, score};
