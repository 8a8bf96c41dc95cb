//! Child process execution for the setup script.
//!
//! Both pipes are drained by `wait_with_output`, which reads stdout and stderr
//! concurrently until EOF before reaping the child. A chatty script therefore
//! cannot fill one pipe and block while we wait on the other.
//!
//! There is no timeout: a script that never exits blocks the runner, and the
//! installer above it, indefinitely.

use crate::error::{ProvisionError, Result};
use crate::interpreter::Invocation;
use crate::log_sink::LogSink;
use anyhow::Context;
use std::process::{Child, Command, Stdio};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Captured result of one PowerShell run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildOutput {
    /// Standard output, decoded as UTF-8
    pub stdout: String,
    /// Standard error, decoded as UTF-8
    pub stderr: String,
    /// Exit code (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ChildOutput {
    /// The code this runner should exit with
    pub fn passthrough_code(&self) -> Result<i32> {
        self.exit_code.ok_or(ProvisionError::ChildTerminated)
    }

    /// Append non-blank output sections and the exit code to the log
    pub fn write_to_log(&self, log: &LogSink) {
        if !self.stdout.trim().is_empty() {
            log.append("--- PowerShell STDOUT ---");
            log.append(self.stdout.trim_end());
        }
        if !self.stderr.trim().is_empty() {
            log.append("--- PowerShell STDERR ---");
            log.append(self.stderr.trim_end());
        }
        match self.exit_code {
            Some(code) => log.append(format!("PowerShell exit code: {}", code)),
            None => log.append("PowerShell exit code: <none>"),
        }
    }
}

fn build_command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(invocation.executable());
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.raw_arg(invocation.argument_line())
            .creation_flags(CREATE_NO_WINDOW);
    }

    #[cfg(not(windows))]
    {
        cmd.args(invocation.args.iter().map(|arg| arg.as_os_str()));
    }

    cmd
}

/// Start PowerShell with both output streams piped.
///
/// Returns `LaunchFailed` if the process cannot be created.
pub fn spawn(invocation: &Invocation) -> Result<Child> {
    tracing::info!(
        "Launching {} {}",
        invocation.executable().display(),
        invocation.argument_line()
    );

    let child = build_command(invocation)
        .spawn()
        .map_err(|source| ProvisionError::LaunchFailed { source })?;
    tracing::debug!("Started PowerShell with PID {}", child.id());
    Ok(child)
}

/// Read both streams to EOF, then wait for the child to exit.
///
/// Any failure here is `Unhandled`.
pub fn drain(child: Child) -> Result<ChildOutput> {
    let pid = child.id();
    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed waiting for powershell.exe (PID {})", pid))?;

    let child_output = ChildOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    };

    match child_output.exit_code {
        Some(0) => tracing::info!("PowerShell completed successfully"),
        Some(code) => tracing::info!("PowerShell failed with exit code {}", code),
        None => tracing::warn!("PowerShell terminated without an exit code"),
    }

    Ok(child_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_output_sections_are_logged() {
        let tmp = tempdir().unwrap();
        let log = LogSink::new(tmp.path().join("run.log"));
        let output = ChildOutput {
            stdout: "OK\r\n\r\n".to_string(),
            stderr: "warning: slow disk\n".to_string(),
            exit_code: Some(0),
        };

        output.write_to_log(&log);

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "--- PowerShell STDOUT ---",
                "OK",
                "--- PowerShell STDERR ---",
                "warning: slow disk",
                "PowerShell exit code: 0",
            ]
        );
    }

    #[test]
    fn test_blank_output_is_not_logged() {
        let tmp = tempdir().unwrap();
        let log = LogSink::new(tmp.path().join("run.log"));
        let output = ChildOutput {
            stdout: "  \n".to_string(),
            stderr: String::new(),
            exit_code: Some(2),
        };

        output.write_to_log(&log);

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "PowerShell exit code: 2\n");
    }

    #[test]
    fn test_passthrough_code() {
        let output = ChildOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(1603),
        };
        assert_eq!(output.passthrough_code().unwrap(), 1603);

        let killed = ChildOutput {
            exit_code: None,
            ..output
        };
        assert_eq!(killed.passthrough_code().unwrap_err().exit_code(), 6);
    }

    #[test]
    fn test_spawn_failure_is_launch_failed() {
        let tmp = tempdir().unwrap();
        let invocation = Invocation {
            executable: tmp.path().join("does-not-exist.exe"),
            args: Vec::new(),
        };

        let err = spawn(&invocation).unwrap_err();
        assert!(matches!(err, ProvisionError::LaunchFailed { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_does_not_deadlock() {
        use crate::types::{RunConfig, RunMode};
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let script = tmp.path().join("fake-powershell");
        // Well past a pipe buffer on both streams
        fs::write(
            &script,
            "#!/bin/sh\nhead -c 300000 /dev/zero | tr '\\0' 'o'\nhead -c 300000 /dev/zero | tr '\\0' 'e' >&2\nexit 7\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let config = RunConfig {
            mode: RunMode::Uninstall,
            script_path: PathBuf::from("setup-mysql.ps1"),
            archive_path: PathBuf::new(),
            schema_path: PathBuf::new(),
        };
        let child = spawn(&Invocation::new(&script, &config)).unwrap();
        let output = drain(child).unwrap();

        assert_eq!(output.exit_code, Some(7));
        assert_eq!(output.stdout.len(), 300_000);
        assert_eq!(output.stderr.len(), 300_000);
    }
}
