//! labelsync: bring GitHub issue labels in line with a reference list.
//!
//! # Usage
//!
//! ```text
//! labelsync <ACCOUNT[/REPOSITORY]>... [-e <REPO>]... [-t <TOKEN>] [-y] [-f <FILE>]
//!           [--api-url <URL>] [--json] [-v]
//! ```
//!
//! Exit codes: 0 done, 1 error, 2 interrupted, 3 stopped at a deletion prompt.

mod console;
mod terminal;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use labelsync_core::ReferenceSet;
use labelsync_remote::{GitHub, GitHubConfig, DEFAULT_API_URL};
use labelsync_sync::{pipeline, SyncContext, SyncError, SyncOptions, Target};

use console::Console;
use terminal::TerminalPrompter;

const EXIT_INTERRUPTED: i32 = 2;
const EXIT_ABORTED: i32 = 3;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "labelsync",
    version,
    about = "Synchronize issue labels across GitHub repositories",
    long_about = None,
)]
struct Cli {
    /// Accounts to synchronize; `ACCOUNT/REPOSITORY` limits a run to one repository.
    #[arg(value_name = "ACCOUNT[/REPOSITORY]", required = true)]
    targets: Vec<Target>,

    /// Repository to leave untouched, by full or bare name. Repeatable.
    #[arg(short, long = "exclude", value_name = "REPO")]
    excludes: Vec<String>,

    /// GitHub access token.
    #[arg(short, long, env = "GITHUB_OAUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delete unrecognized labels without asking.
    #[arg(short = 'y', long = "yes")]
    assume_yes: bool,

    /// Reference list of `name,color` lines; the built-in list is used otherwise.
    #[arg(short, long, value_name = "FILE")]
    file_name: Option<PathBuf>,

    /// GitHub API root.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Log every API call.
    #[arg(short, long)]
    verbose: bool,
}

enum RunEnd {
    Finished,
    Aborted,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ctrlc::set_handler(|| {
        println!("CTRL+C just pressed!");
        process::exit(EXIT_INTERRUPTED);
    })
    .context("failed to install interrupt handler")?;

    match execute(cli)? {
        RunEnd::Finished => Ok(()),
        RunEnd::Aborted => {
            println!("Script stopped by user.");
            process::exit(EXIT_ABORTED);
        }
    }
}

fn execute(cli: Cli) -> Result<RunEnd> {
    let reference = match &cli.file_name {
        Some(path) => ReferenceSet::load_at(path).with_context(|| {
            format!("failed to load reference labels from {}", path.display())
        })?,
        None => ReferenceSet::builtin(),
    };
    debug!(labels = reference.len(), "reference list loaded");

    let config = GitHubConfig {
        base_url: cli.api_url,
        token: cli.token.filter(|token| !token.trim().is_empty()),
        ..GitHubConfig::default()
    };
    let gateway = GitHub::connect(&config);
    let options = SyncOptions {
        assume_yes: cli.assume_yes,
        excludes: cli.excludes,
    };

    let mut prompter = TerminalPrompter::default();
    let mut console = Console::new(cli.json);
    let mut ctx = SyncContext {
        gateway: &gateway,
        reference: &reference,
        options: &options,
        prompter: &mut prompter,
    };
    let result = pipeline::run(&mut ctx, &cli.targets, &mut console);
    console.print_summary()?;

    match result {
        Ok(()) => Ok(RunEnd::Finished),
        Err(SyncError::Aborted { .. }) => Ok(RunEnd::Aborted),
        Err(err) => Err(err).context("synchronization failed"),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
