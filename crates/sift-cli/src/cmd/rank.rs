//! `sift rank`: order candidates by fuzzy score against a query.

use crate::cmd::{format_score, highlight};
use crate::output::{CliError, OutputMode, pretty_section, render_mode};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use sift_core::Scorer;
use sift_core::config::Config;
use sift_core::error::ErrorCode;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Arguments for `sift rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Query fragment to rank candidates against.
    pub query: String,

    /// Candidates to rank. When omitted, read one per line from --file or stdin.
    pub candidates: Vec<String>,

    /// Read candidates from a file, one per line.
    #[arg(short, long, conflicts_with = "candidates")]
    pub file: Option<PathBuf>,

    /// Drop candidates the query does not match.
    #[arg(long)]
    pub matching_only: bool,

    /// Maximum number of rows to emit.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankRow {
    /// 1-based position in the ranked output.
    pub position: usize,
    /// `None` when the query does not match.
    pub score: Option<f64>,
    pub matched: bool,
    /// 0-based position in the input.
    pub index: usize,
    pub label: String,
    pub positions: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankOutput {
    pub query: String,
    pub total: usize,
    /// Candidates the query matched, before `--matching-only` and the limit.
    pub matched: usize,
    pub count: usize,
    pub results: Vec<RankRow>,
}

/// Execute `sift rank`.
///
/// # Errors
///
/// Returns an error if the candidate file or stdin cannot be read, or if
/// writing output fails.
pub fn run_rank(
    args: &RankArgs,
    output: OutputMode,
    config: &Config,
    scorer: &Scorer,
) -> anyhow::Result<()> {
    let candidates = read_candidates(args)
        .map_err(|err| CliError::from_code(ErrorCode::InputReadFailed, format!("{err:#}")))?;

    let drop_unmatched = args.matching_only || config.ranking.drop_unmatched;
    let limit = args.limit.or(config.ranking.limit);
    let result = rank_candidates(scorer, candidates, &args.query, drop_unmatched, limit);

    info!(
        query = %args.query,
        total = result.total,
        matched = result.matched,
        shown = result.count,
        "ranked candidates"
    );

    render_mode(output, &result, render_text, render_pretty)
}

fn read_candidates(args: &RankArgs) -> anyhow::Result<Vec<String>> {
    if !args.candidates.is_empty() {
        return Ok(args.candidates.clone());
    }

    let content = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read candidates from {}", path.display()))?,
        None => io::read_to_string(io::stdin().lock())
            .context("failed to read candidates from stdin")?,
    };

    Ok(split_lines(&content))
}

/// One candidate per line, verbatim apart from the line terminator.
fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn rank_candidates(
    scorer: &Scorer,
    candidates: Vec<String>,
    query: &str,
    drop_unmatched: bool,
    limit: Option<usize>,
) -> RankOutput {
    let total = candidates.len();
    let ranked = scorer.rank_explained_by(candidates, |c| c.as_str(), query);
    let matched = ranked.iter().filter(|r| r.is_match()).count();

    let results: Vec<RankRow> = ranked
        .into_iter()
        .filter(|ranked| !drop_unmatched || ranked.is_match())
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, ranked)| RankRow {
            position: i + 1,
            score: ranked.detail.as_ref().map(|detail| detail.score),
            matched: ranked.is_match(),
            index: ranked.index,
            label: ranked.item,
            positions: ranked.detail.map(|detail| detail.positions).unwrap_or_default(),
        })
        .collect();

    RankOutput {
        query: query.to_string(),
        total,
        matched,
        count: results.len(),
        results,
    }
}

fn render_text(result: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    for row in &result.results {
        writeln!(w, "{}\t{}", format_score(row.score), row.label)?;
    }
    Ok(())
}

fn render_pretty(result: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    if result.results.is_empty() && result.matched == 0 {
        writeln!(w, "No candidates match '{}'.", result.query)?;
        return Ok(());
    }

    pretty_section(
        w,
        &format!(
            "Ranked {} of {} candidates for '{}'",
            result.count, result.total, result.query
        ),
    )?;
    for row in &result.results {
        writeln!(
            w,
            "{:>4}. {:>7}  {}",
            row.position,
            format_score(row.score),
            highlight(&row.label, &row.positions)
        )?;
    }
    Ok(())
}
