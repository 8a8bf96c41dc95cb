//! Fixed names shared between the runner, the installer bundle and the setup script.
//!
//! The installer caches the runner next to its payloads and only talks to it through
//! positional arguments, a couple of environment variables and the exit code, so every
//! value here is part of that contract.

use std::path::PathBuf;

/// Environment variable that overrides the log file location verbatim
pub const LOG_PATH_ENV: &str = "ARABIC_POETRY_INSTALL_LOG";

/// Environment variable pointing at the Windows directory
pub const SYSTEM_ROOT_ENV: &str = "SystemRoot";

/// System root used when `SystemRoot` is unset
pub const DEFAULT_SYSTEM_ROOT: &str = r"C:\Windows";

/// Environment variable pointing at machine-wide application data
pub const COMMON_DATA_ENV: &str = "ProgramData";

/// Machine-wide application data used when `ProgramData` is unset or blank
#[cfg(windows)]
pub fn default_common_data_dir() -> PathBuf {
    PathBuf::from(r"C:\ProgramData")
}

/// Writable stand-in for machine-wide application data on non-Windows hosts
#[cfg(not(windows))]
pub fn default_common_data_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Location of powershell.exe relative to the system root, one entry per component
pub const INTERPRETER_SUBPATH: &[&str] = &["System32", "WindowsPowerShell", "v1.0", "powershell.exe"];

/// Payload file names used when no explicit paths are supplied
pub const SCRIPT_FILE_NAME: &str = "setup-mysql.ps1";
pub const ARCHIVE_FILE_NAME: &str = "mysql.zip";
pub const SCHEMA_FILE_NAME: &str = "schema-install.sql";

/// Desktop folder that opts a machine into desktop logging when it already exists
pub const DESKTOP_LOG_DIR: &str = "ArabicPoetryLogs";

/// Log directory under machine-wide application data
pub const COMMON_LOG_SUBDIR: &[&str] = &["ArabicPoetry", "install-logs"];

/// Log file name used by both the desktop and application-data locations
pub const LOG_FILE_NAME: &str = "ArabicPoetry-MySqlProvision.log";

/// First line written to the log on every run
pub const LOG_BANNER: &str = "=== ArabicPoetry MySQL provisioning runner ===";

// Exit codes understood by the installer. The child's own code is passed through otherwise.
pub const EXIT_MISSING_PAYLOAD: i32 = 3;
pub const EXIT_INTERPRETER_NOT_FOUND: i32 = 4;
pub const EXIT_LAUNCH_FAILED: i32 = 5;
pub const EXIT_UNHANDLED: i32 = 6;
