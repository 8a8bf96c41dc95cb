//! MySQL provisioning runner - Main entry point

use mysql_provision::cli::Cli;
use mysql_provision::config::EXIT_UNHANDLED;
use mysql_provision::SystemEnvironment;
use tracing_subscriber::EnvFilter;

/// Initialize diagnostics on stderr, quiet unless RUST_LOG asks for more
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_UNHANDLED);
        }
    };
    tracing::debug!("CLI arguments parsed: {:?}", cli.args);

    let mut stderr = std::io::stderr().lock();
    let code = mysql_provision::run(&cli.args, &SystemEnvironment, &mut stderr);
    drop(stderr);

    std::process::exit(code);
}
