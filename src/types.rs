//! Run-scoped types shared by the resolver, validator and launcher.

use std::path::PathBuf;
use strum::{Display, EnumString};

/// What the setup script is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RunMode {
    #[default]
    Install,
    Uninstall,
}

impl RunMode {
    /// Parse a mode token the way the installer passes it (surrounding whitespace, any casing)
    pub fn from_token(token: &str) -> Option<Self> {
        token.trim().parse().ok()
    }

    /// Returns true if the archive and schema payloads are needed
    pub fn requires_full_payload(self) -> bool {
        matches!(self, Self::Install)
    }
}

/// Fully resolved inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: RunMode,
    /// PowerShell setup script
    pub script_path: PathBuf,
    /// Zipped MySQL distribution
    pub archive_path: PathBuf,
    /// SQL applied after the server comes up
    pub schema_path: PathBuf,
}
