//! # espir CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and runs
//! the configuration harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use espir_cli::check::{run_check, CheckArgs};
use espir_cli::DEFAULT_CONFIG_PATH;

/// ESP IR hub configuration checker.
///
/// Verifies that the configuration validator accepts the baseline document
/// and rejects every negative case and every seeded fuzz mutant of it.
#[derive(Parser, Debug)]
#[command(name = "espir", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let repo_root = resolve_repo_root().unwrap_or_else(|| {
        tracing::warn!("Could not locate repository root; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    match run_check(&cli.check, &repo_root) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Walk up from the current directory to the first directory holding the
/// default baseline document.
fn resolve_repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join(DEFAULT_CONFIG_PATH).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
