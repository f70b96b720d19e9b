//! chatlog-spam-filter: binary entrypoint.
//! Parses the command line, loads settings and the rule table, runs one batch.

use anyhow::{Context, Result};
use chatlog_spam_filter::{run, Classifier, RunOptions, Settings};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "chatlog-spam-filter",
    about = "Extract advertising spam from a chat log and adapt the spam threshold across runs"
)]
#[command(version)]
struct Cli {
    /// Print each flagged message and enable debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Adaptive state file (default: adaptive_config.json)
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Directory for spam logs and phrase lists (default: logs)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Rule table TOML replacing the built-in one
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Chat log to classify, one message per line
    logfile: PathBuf,
}

/// Logs go to stderr so `Spam:` echoes on stdout stay clean.
/// RUST_LOG wins; otherwise info for this crate, or debug with `-v`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "chatlog_spam_filter=debug,classifier=debug,warn"
    } else {
        "chatlog_spam_filter=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    // Load .env if present; no-op otherwise.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::from_env().with_overrides(cli.state, cli.log_dir, cli.rules);

    let table = settings
        .load_rule_table()
        .context("failed to load rule table")?;
    let classifier = Classifier::from_table(&table).context("failed to compile rule table")?;

    let opts = RunOptions {
        input: cli.logfile,
        state_path: settings.state_path,
        log_dir: settings.log_dir,
        verbose: cli.verbose,
    };
    let report = run(&opts, &classifier, chrono::Local::now())?;

    info!(
        lines = report.counts.lines,
        spam = report.counts.spam,
        threshold = report.threshold_used,
        adjustment = %report.adjustment,
        phrases = report.phrases,
        "run complete"
    );
    Ok(())
}
