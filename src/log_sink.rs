//! Append-only diagnostic log for post-mortem analysis of a provisioning run.
//!
//! Logging never fails the run. Every append opens, writes and closes the file on its
//! own, and any I/O error is dropped after a `tracing` debug event.

use crate::config::{
    default_common_data_dir, COMMON_DATA_ENV, COMMON_LOG_SUBDIR, DESKTOP_LOG_DIR, LOG_FILE_NAME,
    LOG_PATH_ENV,
};
use crate::environment::HostEnvironment;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle to the run's log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    /// Use an explicit log file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the log location.
    ///
    /// Order: the `ARABIC_POETRY_INSTALL_LOG` override, then `ArabicPoetryLogs` on the
    /// desktop if that folder already exists, then machine-wide application data.
    pub fn resolve(env: &impl HostEnvironment) -> Self {
        if let Some(path) = env.non_blank_var(LOG_PATH_ENV) {
            let sink = Self::new(path);
            sink.ensure_parent_dir();
            return sink;
        }

        if let Some(desktop) = env.desktop_dir() {
            let mapped = desktop.join(DESKTOP_LOG_DIR);
            if mapped.is_dir() {
                return Self::new(mapped.join(LOG_FILE_NAME));
            }
        }

        let common = env
            .non_blank_var(COMMON_DATA_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_common_data_dir);
        let dir = COMMON_LOG_SUBDIR
            .iter()
            .fold(common, |acc, component| acc.join(component));
        let sink = Self::new(dir.join(LOG_FILE_NAME));
        sink.ensure_parent_dir();
        sink
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. Errors are swallowed.
    pub fn append(&self, message: impl AsRef<str>) {
        if let Err(e) = self.try_append(message.as_ref()) {
            tracing::debug!("Log write to {} failed: {}", self.path.display(), e);
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", message)
    }

    fn ensure_parent_dir(&self) {
        let Some(dir) = self.path.parent() else {
            return;
        };
        if dir.as_os_str().is_empty() {
            return;
        }
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::debug!("Cannot create log directory {}: {}", dir.display(), e);
        }
    }
}
