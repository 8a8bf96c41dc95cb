//! Read-only view of the host the runner is executing on.
//!
//! Environment variables, well-known folders and the runner's own location are the
//! only global inputs. They all go through `HostEnvironment` so tests can pin them.

use std::collections::HashMap;
use std::path::PathBuf;

/// Host lookups needed to resolve payloads, the interpreter and the log file
pub trait HostEnvironment {
    /// Value of an environment variable, `None` when unset or not valid Unicode
    fn var(&self, key: &str) -> Option<String>;

    /// The current user's desktop folder
    fn desktop_dir(&self) -> Option<PathBuf>;

    /// Directory containing the running executable
    fn executable_dir(&self) -> PathBuf;

    /// Value of an environment variable, treating blank values as unset
    fn non_blank_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl HostEnvironment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn desktop_dir(&self) -> Option<PathBuf> {
        dirs::desktop_dir()
    }

    fn executable_dir(&self) -> PathBuf {
        match std::env::current_exe() {
            Ok(exe) => exe
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            Err(e) => {
                tracing::warn!("Cannot determine executable location: {}", e);
                PathBuf::from(".")
            }
        }
    }
}

/// Fixed environment for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
    desktop: Option<PathBuf>,
    executable_dir: PathBuf,
}

impl StaticEnvironment {
    pub fn new(executable_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable_dir: executable_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_desktop(mut self, desktop: impl Into<PathBuf>) -> Self {
        self.desktop = Some(desktop.into());
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn desktop_dir(&self) -> Option<PathBuf> {
        self.desktop.clone()
    }

    fn executable_dir(&self) -> PathBuf {
        self.executable_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_environment_lookups() {
        let env = StaticEnvironment::new("/opt/runner")
            .with_var("SystemRoot", r"D:\Windows")
            .with_desktop("/home/user/Desktop");

        assert_eq!(env.var("SystemRoot").as_deref(), Some(r"D:\Windows"));
        assert_eq!(env.var("Missing"), None);
        assert_eq!(env.desktop_dir(), Some(PathBuf::from("/home/user/Desktop")));
        assert_eq!(env.executable_dir(), PathBuf::from("/opt/runner"));
    }

    #[test]
    fn test_blank_var_is_treated_as_unset() {
        let env = StaticEnvironment::new(".")
            .with_var("BLANK", "   ")
            .with_var("SET", "value");

        assert_eq!(env.non_blank_var("BLANK"), None);
        assert_eq!(env.non_blank_var("SET").as_deref(), Some("value"));
        assert_eq!(env.non_blank_var("UNSET"), None);
    }
}
