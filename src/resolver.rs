//! Argument resolution: run mode plus the three payload paths.
//!
//! ```text
//! <program> [install|uninstall] [scriptPath archivePath schemaPath]
//! ```
//!
//! The mode token is optional. Payload paths are all-or-nothing: unless all three
//! are present and non-blank, every path falls back to a well-known file name next
//! to the runner executable.

use crate::config::{ARCHIVE_FILE_NAME, SCHEMA_FILE_NAME, SCRIPT_FILE_NAME};
use crate::log_sink::LogSink;
use crate::types::{RunConfig, RunMode};
use std::path::{Path, PathBuf};

/// Split off the optional leading mode token.
///
/// Returns the mode and the remaining arguments. Unrecognized or missing tokens
/// default to install and consume nothing.
pub fn resolve_mode<S: AsRef<str>>(args: &[S]) -> (RunMode, &[S]) {
    match args.split_first() {
        Some((first, rest)) => match RunMode::from_token(first.as_ref()) {
            Some(mode) => (mode, rest),
            None => (RunMode::Install, args),
        },
        None => (RunMode::Install, args),
    }
}

/// Take the first three arguments as explicit payload paths, if all are usable
pub fn explicit_paths<S: AsRef<str>>(args: &[S]) -> Option<[PathBuf; 3]> {
    let usable = |i: usize| {
        let value: &str = args.get(i)?.as_ref();
        (!value.trim().is_empty()).then(|| PathBuf::from(value))
    };
    Some([usable(0)?, usable(1)?, usable(2)?])
}

/// Payload paths next to the runner executable
pub fn fallback_paths(base_dir: &Path) -> [PathBuf; 3] {
    [
        base_dir.join(SCRIPT_FILE_NAME),
        base_dir.join(ARCHIVE_FILE_NAME),
        base_dir.join(SCHEMA_FILE_NAME),
    ]
}

/// Build the run configuration from raw arguments without side effects
pub fn resolve_run_config<S: AsRef<str>>(args: &[S], base_dir: &Path) -> RunConfig {
    let (mode, rest) = resolve_mode(args);
    let [script_path, archive_path, schema_path] = match explicit_paths(rest) {
        Some(paths) => paths,
        None => {
            tracing::debug!("Explicit payload paths incomplete, using {}", base_dir.display());
            fallback_paths(base_dir)
        }
    };

    RunConfig {
        mode,
        script_path,
        archive_path,
        schema_path,
    }
}

/// Resolve the run configuration and record every resolved value in the log
pub fn resolve_and_log<S: AsRef<str>>(args: &[S], base_dir: &Path, log: &LogSink) -> RunConfig {
    let config = resolve_run_config(args, base_dir);
    log.append(format!("Mode: {}", config.mode));
    log.append(format!("Resolved setup-mysql.ps1: {}", config.script_path.display()));
    log.append(format!("Resolved mysql.zip:       {}", config.archive_path.display()));
    log.append(format!("Resolved schema SQL:      {}", config.schema_path.display()));
    config
}
