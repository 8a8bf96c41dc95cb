//! Payload validation gate.
//!
//! Nothing is launched unless every file the selected mode needs is on disk.

use crate::error::{ProvisionError, Result};
use crate::log_sink::LogSink;
use crate::types::{RunConfig, RunMode};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One payload file checked for existence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadCheck {
    /// Short label used in diagnostics
    pub label: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

impl PayloadCheck {
    fn inspect(label: &'static str, path: &Path) -> Self {
        Self {
            label,
            path: path.to_path_buf(),
            exists: path.is_file(),
        }
    }

    /// Diagnostic line, e.g. `mysql.zip:       C:\bundle\mysql.zip (exists=false)`
    pub fn describe(&self) -> String {
        format!(
            "{:<17}{} (exists={})",
            format!("{}:", self.label),
            self.path.display(),
            self.exists
        )
    }
}

/// Check the files the run's mode requires
pub fn check_payloads(config: &RunConfig) -> Vec<PayloadCheck> {
    let mut checks = vec![PayloadCheck::inspect("setup-mysql.ps1", &config.script_path)];
    if config.mode.requires_full_payload() {
        checks.push(PayloadCheck::inspect("mysql.zip", &config.archive_path));
        checks.push(PayloadCheck::inspect("schema SQL", &config.schema_path));
    }
    checks
}

/// Fail with `MissingPayload` if any required file is absent.
///
/// On failure one existence line per checked file goes to both `err` and the log.
pub fn validate_payloads<W: Write>(config: &RunConfig, log: &LogSink, err: &mut W) -> Result<()> {
    let checks = check_payloads(config);
    let missing: Vec<PathBuf> = checks
        .iter()
        .filter(|c| !c.exists)
        .map(|c| c.path.clone())
        .collect();

    if missing.is_empty() {
        tracing::debug!("All {} payload file(s) present", checks.len());
        return Ok(());
    }

    let headline = match config.mode {
        RunMode::Install => "Missing provisioning payload(s).",
        RunMode::Uninstall => "Missing setup-mysql.ps1 payload.",
    };
    // Error stream is best-effort like the log; the exit code carries the outcome
    let _ = writeln!(err, "{}", headline);
    log.append(format!("ERROR: {}", headline));
    for check in &checks {
        let line = check.describe();
        let _ = writeln!(err, "{}", line);
        log.append(line);
    }

    Err(ProvisionError::MissingPayload { missing })
}
