//! # espir-cli — CLI Tool for the ESP IR Hub Configuration
//!
//! Provides the `espir` command-line interface. Invoked with no arguments it
//! runs the full harness on `config/system_config.json` with seed 1337 and
//! 100 fuzz iterations against the native validator:
//!
//! ```bash
//! espir
//! espir --engine json-schema
//! espir --config hub.json --seed 42 --iterations 500 -vv
//! ```
//!
//! Flags only ever override the defaults; they never change what a bare
//! invocation does.

pub mod check;

use std::path::{Path, PathBuf};

/// Baseline document, relative to the repository root.
pub const DEFAULT_CONFIG_PATH: &str = "config/system_config.json";

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}
