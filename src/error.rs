//! Error handling module for the provisioning runner
//!
//! Every failure the runner can hit maps to exactly one variant here, and every
//! variant maps to the exit code the installer framework expects.

use crate::config::{
    EXIT_INTERPRETER_NOT_FOUND, EXIT_LAUNCH_FAILED, EXIT_MISSING_PAYLOAD, EXIT_UNHANDLED,
};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the provisioning runner
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// One or more payload files required by the selected mode are absent
    #[error("Missing provisioning payload(s): {}", display_paths(.missing))]
    MissingPayload { missing: Vec<PathBuf> },

    /// The PowerShell executable does not exist under the system root
    #[error("powershell.exe not found at: {}", .path.display())]
    InterpreterNotFound { path: PathBuf },

    /// The OS refused to create the child process
    #[error("Failed to start powershell.exe: {source}")]
    LaunchFailed {
        #[source]
        source: std::io::Error,
    },

    /// The child ended without reporting an exit code (killed by a signal)
    #[error("PowerShell terminated without an exit code")]
    ChildTerminated,

    /// Anything else that went wrong while orchestrating the child
    #[error("Provisioning failed: {0}")]
    Unhandled(String),
}

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

impl ProvisionError {
    /// Create an unhandled error from any displayable failure
    pub fn unhandled(msg: impl Into<String>) -> Self {
        Self::Unhandled(msg.into())
    }

    /// Exit code reported to the installer for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPayload { .. } => EXIT_MISSING_PAYLOAD,
            Self::InterpreterNotFound { .. } => EXIT_INTERPRETER_NOT_FOUND,
            Self::LaunchFailed { .. } => EXIT_LAUNCH_FAILED,
            Self::ChildTerminated | Self::Unhandled(_) => EXIT_UNHANDLED,
        }
    }
}

impl From<anyhow::Error> for ProvisionError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain for the log
        Self::unhandled(format!("{:#}", err))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
