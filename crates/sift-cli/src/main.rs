#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use sift_core::config::resolve_config;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "sift: fuzzy subsequence scoring and ranking",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for --format json.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Path to a config file (overrides SIFT_CONFIG).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Score one candidate against a query",
        long_about = "Score a candidate label against a query fragment. Lower is better: 0.0 is a perfect match, -1 means the query is not a subsequence of the candidate.",
        after_help = "EXAMPLES:\n    # Score a single candidate\n    sift score \"System Settings\" sse\n\n    # Show the score components as JSON\n    sift score axybz ab --format json"
    )]
    Score(cmd::score::ScoreArgs),

    #[command(
        about = "Rank candidates by fuzzy score",
        long_about = "Rank candidates best-first by fuzzy score against a query. Ties keep input order. Candidates the query does not match are listed last unless --matching-only is set.",
        after_help = "EXAMPLES:\n    # Rank candidates given as arguments\n    sift rank ab xyz axybz abc\n\n    # Rank lines from a file, best five only\n    sift rank set --file apps.txt -n 5\n\n    # Rank lines from stdin, dropping non-matches\n    ls /Applications | sift rank saf --matching-only"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for sift.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sift completions bash > ~/.local/share/bash-completion/completions/sift\n\n    # Generate zsh completions\n    sift completions zsh > ~/.zfunc/_sift"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "sift=debug,sift_core=debug,warn"
        } else {
            "sift=warn,sift_core=warn"
        })
    });

    let format = env::var("SIFT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries results only
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    // config may be what failed, so errors before it loads ignore its `output`
    let mut output = resolve_output_mode(cli.format, cli.json, None);
    match run(&cli, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // the only error report written to stderr
            if let Err(render_err) = render_error(output, &CliError::from(&err)) {
                error!(error = %render_err, cause = %format!("{err:#}"), "failed to report error");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: &mut OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let config = resolve_config(cli.config.as_deref())?;
    debug!(?config, "resolved config");

    *output = resolve_output_mode(cli.format, cli.json, config.output.as_deref());
    let scorer = config.scorer().context("invalid scoring weights")?;

    match &cli.command {
        Commands::Score(args) => cmd::score::run_score(args, *output, &scorer),
        Commands::Rank(args) => cmd::rank::run_rank(args, *output, &config, &scorer),
        Commands::Completions(_) => Ok(()),
    }
}
