//! `sift score`: score one candidate against one query.

use crate::cmd::{format_score, highlight};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use serde::Serialize;
use sift_core::{MatchDetail, NO_MATCH, Scorer};
use std::io::Write;
use tracing::debug;

/// Arguments for `sift score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Candidate label to search in.
    pub candidate: String,

    /// Query fragment to look for.
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreOutput {
    pub candidate: String,
    pub query: String,
    pub matched: bool,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<MatchDetail>,
}

impl ScoreOutput {
    fn new(scorer: &Scorer, candidate: &str, query: &str) -> Self {
        let detail = scorer.explain(candidate, query);
        Self {
            candidate: candidate.to_string(),
            query: query.to_string(),
            matched: detail.is_some(),
            score: detail.as_ref().map_or(NO_MATCH, |d| d.score),
            detail,
        }
    }
}

/// Execute `sift score`.
///
/// A non-matching candidate is a normal result, not an error.
///
/// # Errors
///
/// Returns an error only if writing output fails.
pub fn run_score(args: &ScoreArgs, output: OutputMode, scorer: &Scorer) -> anyhow::Result<()> {
    let result = ScoreOutput::new(scorer, &args.candidate, &args.query);
    debug!(matched = result.matched, score = result.score, "scored candidate");

    render_mode(output, &result, render_text, render_pretty)
}

fn render_text(result: &ScoreOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let positions = result.detail.as_ref().map_or_else(
        || "-".to_string(),
        |d| {
            d.positions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        },
    );
    writeln!(w, "{:.4}\t{}\t{positions}", result.score, result.matched)
}

fn render_pretty(result: &ScoreOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Fuzzy score")?;
    pretty_kv(w, "Query", &result.query)?;
    match &result.detail {
        Some(detail) => {
            pretty_kv(w, "Candidate", highlight(&result.candidate, &detail.positions))?;
            pretty_kv(w, "Score", format_score(Some(detail.score)))?;
            pretty_kv(w, "Start", format!("{:.4}", detail.start))?;
            pretty_kv(w, "Compactness", format!("{:.4}", detail.compactness))?;
            pretty_kv(w, "Coverage", format!("{:.4}", detail.coverage))?;
        }
        None => {
            pretty_kv(w, "Candidate", &result.candidate)?;
            pretty_kv(w, "Score", "no match")?;
        }
    }
    Ok(())
}
