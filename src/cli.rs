use clap::Parser;
use std::ffi::OsString;

/// MySQL provisioning runner invoked by the ArabicPoetry installer
///
/// Help and version flags are disabled: the installer only ever passes the
/// documented tokens, and any other token must reach argument resolution.
#[derive(Parser, Debug)]
#[command(name = "provision-mysql")]
#[command(about = "Runs the bundled setup-mysql.ps1 to install or uninstall MySQL")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Optional mode (install | uninstall) followed by the setup script, MySQL
    /// archive and schema SQL paths.
    ///
    /// Tokens are kept verbatim, blanks included. Unless all three paths are
    /// given, the payloads next to this executable are used.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse from the process arguments
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_from_tokens(std::env::args_os().skip(1))
    }

    /// Parse installer tokens (program name excluded).
    ///
    /// An escape `--` is inserted ahead of the tokens so clap takes every one
    /// of them as a value, including a literal `--`.
    pub fn try_from_tokens<I, T>(tokens: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = [OsString::from("provision-mysql"), OsString::from("--")]
            .into_iter()
            .chain(tokens.into_iter().map(Into::into));
        Self::try_parse_from(argv)
    }
}
