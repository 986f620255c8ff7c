//! # Launch Module
//!
//! Everything needed to run an external program in the foreground of the
//! terminal the dashboard lives in.
//!
//! - [`PendingLaunch`] - a single request produced by activating an entry
//! - [`handoff::HandoffController`] - gives the terminal to the child and takes
//!   it back afterwards
//! - [`shell_in_dir`] - the optional "open a shell here" helper for places
//!
//! ## Shell in directory
//!
//! Opening a shell is off by default. Only when `LAUNCHDECK_LAUNCH_IN_DIR` is
//! set to a non-blank value does [`shell_in_dir`] produce a launch; otherwise
//! it reports what it would have done.

pub mod error;
pub mod handoff;

pub use error::LaunchFailure;
pub use handoff::{HandoffController, HandoffState, LaunchOutcome};

use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Environment variable enabling [`shell_in_dir`].
pub const LAUNCH_IN_DIR_ENV: &str = "LAUNCHDECK_LAUNCH_IN_DIR";

/// What the child process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// A command line interpreted by `sh -c`.
    ShellCommand(String),
    /// The user's login shell started in `dir`.
    InteractiveShell { dir: PathBuf },
}

impl LaunchTarget {
    /// Build the process command. Standard streams are wired by the caller.
    pub fn to_command(&self) -> Command {
        match self {
            LaunchTarget::ShellCommand(line) => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(line);
                command
            }
            LaunchTarget::InteractiveShell { dir } => {
                let shell = std::env::var("SHELL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| "/bin/sh".to_string());
                let mut command = Command::new(shell);
                command.current_dir(dir);
                command
            }
        }
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchTarget::ShellCommand(line) => write!(f, "{line}"),
            LaunchTarget::InteractiveShell { dir } => write!(f, "shell in {}", dir.display()),
        }
    }
}

/// A request to run something, waiting for the UI loop to let go of the
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLaunch {
    /// Display name of the entry that produced the request.
    pub name: String,
    pub target: LaunchTarget,
}

impl PendingLaunch {
    pub fn command(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: LaunchTarget::ShellCommand(line.into()),
        }
    }
}

/// Result of asking for a shell in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    /// Feature enabled and directory present.
    Launch(PendingLaunch),
    /// Feature disabled; message describes what would have happened.
    DryRun(String),
    /// Feature enabled but the directory is missing.
    MissingDirectory(PathBuf),
}

/// Whether [`LAUNCH_IN_DIR_ENV`] is set to something non-blank.
pub fn launch_in_dir_enabled() -> bool {
    std::env::var(LAUNCH_IN_DIR_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}

/// Decide what opening a shell in `dir` means right now.
pub fn shell_in_dir(name: &str, dir: &Path, enabled: bool) -> ShellRequest {
    let dir = resolve_dir_path(dir);
    if !enabled {
        return ShellRequest::DryRun(format!("Would launch shell in: {}", dir.display()));
    }
    if !dir.is_dir() {
        return ShellRequest::MissingDirectory(dir);
    }
    ShellRequest::Launch(PendingLaunch {
        name: name.to_string(),
        target: LaunchTarget::InteractiveShell { dir },
    })
}

/// Resolve a configured place path: empty is `/`, a leading `~` is the home
/// directory and relative paths are made absolute against the working
/// directory. Falls back to the input when resolution is impossible.
pub fn resolve_dir_path(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::from("/");
    }

    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match directories::BaseDirs::new() {
            Some(base) if rest.as_os_str().is_empty() => base.home_dir().to_path_buf(),
            Some(base) => base.home_dir().join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        return expanded;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&expanded))
        .unwrap_or(expanded)
}
