//! PowerShell discovery and invocation arguments.

use crate::config::{DEFAULT_SYSTEM_ROOT, INTERPRETER_SUBPATH, SYSTEM_ROOT_ENV};
use crate::environment::HostEnvironment;
use crate::error::{ProvisionError, Result};
use crate::types::{RunConfig, RunMode};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Flags that precede the script on every invocation
const BASE_FLAGS: &[&str] = &["-NoProfile", "-STA", "-ExecutionPolicy", "Bypass", "-File"];

/// Expected location of powershell.exe under the system root
pub fn interpreter_path(env: &impl HostEnvironment) -> PathBuf {
    let root = env
        .var(SYSTEM_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_ROOT));
    INTERPRETER_SUBPATH
        .iter()
        .fold(root, |acc, component| acc.join(component))
}

/// Locate powershell.exe, failing with `InterpreterNotFound` if it is not on disk
pub fn locate_interpreter(env: &impl HostEnvironment) -> Result<PathBuf> {
    let path = interpreter_path(env);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ProvisionError::InterpreterNotFound { path })
    }
}

/// One argument passed to PowerShell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationArg {
    /// Emitted as-is
    Flag(&'static str),
    /// Emitted double-quoted
    Path(PathBuf),
}

impl InvocationArg {
    /// Text for a Windows command line
    pub fn render(&self) -> String {
        match self {
            Self::Flag(flag) => (*flag).to_string(),
            Self::Path(path) => quote(&path.to_string_lossy()),
        }
    }

    /// Raw value for hosts that pass argv entries separately
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Flag(flag) => OsStr::new(flag),
            Self::Path(path) => path.as_os_str(),
        }
    }
}

/// Everything needed to start PowerShell for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: PathBuf,
    pub args: Vec<InvocationArg>,
}

impl Invocation {
    /// Build the invocation for a validated configuration
    pub fn new(executable: impl Into<PathBuf>, config: &RunConfig) -> Self {
        let mut args: Vec<InvocationArg> =
            BASE_FLAGS.iter().copied().map(InvocationArg::Flag).collect();
        args.push(InvocationArg::Path(config.script_path.clone()));

        match config.mode {
            RunMode::Uninstall => args.push(InvocationArg::Flag("-Uninstall")),
            RunMode::Install => {
                args.push(InvocationArg::Flag("-MysqlZip"));
                args.push(InvocationArg::Path(config.archive_path.clone()));
                args.push(InvocationArg::Flag("-SchemaSql"));
                args.push(InvocationArg::Path(config.schema_path.clone()));
            }
        }

        Self {
            executable: executable.into(),
            args,
        }
    }

    /// The full argument line as PowerShell receives it on Windows
    pub fn argument_line(&self) -> String {
        self.args
            .iter()
            .map(InvocationArg::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

/// Wrap a value in double quotes, backslash-escaping embedded quotes
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}
