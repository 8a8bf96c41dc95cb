//! MySQL provisioning runner
//!
//! This library resolves the provisioning payloads, runs the PowerShell setup
//! script and maps its outcome to an exit code for the installer.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod log_sink;
pub mod payload;
pub mod resolver;
pub mod runner;
pub mod stage;
pub mod types;

// Re-export main types for convenience
pub use environment::{HostEnvironment, StaticEnvironment, SystemEnvironment};
pub use error::ProvisionError;
pub use interpreter::{Invocation, InvocationArg};
pub use launcher::ChildOutput;
pub use log_sink::LogSink;
pub use runner::{run, run_with_log};
pub use stage::{RunStage, StageTracker};
pub use types::{RunConfig, RunMode};
