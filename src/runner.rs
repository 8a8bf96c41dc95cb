//! End-to-end provisioning run: resolve, validate, launch, report.
//!
//! The returned integer is the process exit code. On success it is PowerShell's
//! own exit code, untouched. Every failure is written to the error stream and the
//! log before being mapped to its distinguished code.

use crate::config::LOG_BANNER;
use crate::environment::HostEnvironment;
use crate::error::{ProvisionError, Result};
use crate::interpreter::{locate_interpreter, Invocation};
use crate::launcher::{drain, spawn};
use crate::log_sink::LogSink;
use crate::payload::validate_payloads;
use crate::resolver::resolve_and_log;
use crate::stage::StageTracker;
use std::io::Write;
use std::path::Path;

/// Run one provisioning pass with a resolved log sink
pub fn run<S, E, W>(args: &[S], env: &E, err: &mut W) -> i32
where
    S: AsRef<str>,
    E: HostEnvironment,
    W: Write,
{
    let log = LogSink::resolve(env);
    tracing::debug!("Logging run to {}", log.path().display());
    run_with_log(args, env, &log, err)
}

/// Run one provisioning pass writing to `log`
pub fn run_with_log<S, E, W>(args: &[S], env: &E, log: &LogSink, err: &mut W) -> i32
where
    S: AsRef<str>,
    E: HostEnvironment,
    W: Write,
{
    let base_dir = env.executable_dir();
    write_preamble(args, &base_dir, log);

    let mut stages = StageTracker::new();
    match provision(args, &base_dir, env, log, err, &mut stages) {
        Ok(code) => {
            stages.advance();
            code
        }
        Err(e) => {
            let stage = stages.current();
            tracing::info!("{} failed: {}", stage, e);
            stages.fail();
            report_failure(&e, log, err);
            log.append(format!("Failed stage: {}", stage));
            e.exit_code()
        }
    }
}

fn write_preamble<S: AsRef<str>>(args: &[S], base_dir: &Path, log: &LogSink) {
    log.append(LOG_BANNER);
    log.append(format!("Timestamp: {}", chrono::Local::now().to_rfc3339()));
    log.append(format!("BaseDirectory: {}", base_dir.display()));
    let joined = if args.is_empty() {
        "<none>".to_string()
    } else {
        args.iter().map(|a| a.as_ref()).collect::<Vec<&str>>().join(" | ")
    };
    log.append(format!("Args: {}", joined));
}

fn provision<S, E, W>(
    args: &[S],
    base_dir: &Path,
    env: &E,
    log: &LogSink,
    err: &mut W,
    stages: &mut StageTracker,
) -> Result<i32>
where
    S: AsRef<str>,
    E: HostEnvironment,
    W: Write,
{
    stages.advance();
    let config = resolve_and_log(args, base_dir, log);

    stages.advance();
    validate_payloads(&config, log, err)?;

    stages.advance();
    let interpreter = locate_interpreter(env)?;

    stages.advance();
    let invocation = Invocation::new(interpreter, &config);
    let child = spawn(&invocation)?;

    stages.advance();
    let output = drain(child)?;
    output.write_to_log(log);
    output.passthrough_code()
}

fn report_failure<W: Write>(error: &ProvisionError, log: &LogSink, err: &mut W) {
    match error {
        // The validator already wrote one line per checked payload
        ProvisionError::MissingPayload { .. } => {}
        ProvisionError::Unhandled(_) => {
            let _ = writeln!(err, "{}", error);
            log.append(format!("EXCEPTION: {}", error));
        }
        _ => {
            let _ = writeln!(err, "{}", error);
            log.append(format!("ERROR: {}", error));
        }
    }
}
