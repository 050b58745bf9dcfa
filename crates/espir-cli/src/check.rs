//! # Check Command
//!
//! Loads the configuration document and runs the baseline, negative-case
//! and fuzz phases against the selected validator engine.
//!
//! Outcomes map to exit codes the way CI expects:
//!
//! | Outcome | stdout | exit |
//! |---|---|---|
//! | every phase behaved | `OK: config parser negative/fuzz cases behaved as expected` | 0 |
//! | a case behaved unexpectedly | `FAIL: <case>` | 1 |
//! | the document or schema cannot be loaded | (error logged) | 1 |
//! | every phase behaved, `--report` cannot be written | `OK: …`, then the error logged | 1 |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use espir_core::Document;
use espir_harness::{Harness, HarnessConfig, HarnessReport, DEFAULT_ITERATIONS, DEFAULT_SEED};
use espir_schema::{ConfigValidator, DocumentValidator, JsonSchemaValidator};

use crate::{resolve_path, DEFAULT_CONFIG_PATH};

/// Printed when every phase behaved as expected.
pub const OK_LINE: &str = "OK: config parser negative/fuzz cases behaved as expected";

/// Validator engine to put under test.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Nominal recursive-descent validator.
    #[default]
    Native,
    /// Draft 2020-12 JSON Schema.
    JsonSchema,
}

/// Arguments for the harness run. All optional.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Configuration document to use as the baseline (JSON).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the fuzz PRNG.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of fuzz iterations.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Validator engine under test.
    #[arg(long, value_enum, default_value_t = Engine::Native)]
    pub engine: Engine,

    /// JSON Schema to compile instead of the bundled one (json-schema engine only).
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Write the run report as JSON to this path on success.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl CheckArgs {
    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            seed: self.seed,
            iterations: self.iterations,
        }
    }
}

/// Execute the harness run.
pub fn run_check(args: &CheckArgs, repo_root: &Path) -> Result<u8> {
    let config_path = resolve_path(
        args.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH)),
        repo_root,
    );
    tracing::info!(path = %config_path.display(), "loading baseline config");

    let document = Document::from_path(&config_path)
        .with_context(|| format!("failed to load baseline config: {}", config_path.display()))?;

    let validator = build_validator(args, repo_root)?;
    tracing::info!(engine = validator.name(), "running harness");

    match Harness::new(validator.as_ref(), args.harness_config()).run(document.as_value()) {
        Ok(report) => {
            println!("{OK_LINE}");
            if let Some(path) = &args.report {
                write_report(&report, path)?;
            }
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}

fn build_validator(args: &CheckArgs, repo_root: &Path) -> Result<Box<dyn DocumentValidator>> {
    match args.engine {
        Engine::Native => {
            if args.schema.is_some() {
                tracing::warn!("--schema is ignored by the native engine");
            }
            Ok(Box::new(ConfigValidator::new()))
        }
        Engine::JsonSchema => {
            let validator = match &args.schema {
                Some(path) => JsonSchemaValidator::from_path(resolve_path(path, repo_root))?,
                None => JsonSchemaValidator::bundled()?,
            };
            tracing::debug!(schema = validator.schema_name(), "compiled JSON schema");
            Ok(Box::new(validator))
        }
    }
}

fn write_report(report: &HarnessReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote harness report");
    Ok(())
}
