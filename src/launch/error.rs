//! Error types for launched programs.
//!
//! None of these stop the dashboard. They are logged, shown in the status
//! line, and the UI takes the terminal back.

use nix::sys::signal::Signal;
use thiserror::Error;

/// Why a launch did not end normally.
#[derive(Debug, Error)]
pub enum LaunchFailure {
    /// The signal listeners could not be installed, so nothing was started.
    #[error("Failed to install signal forwarding: {0}")]
    SignalSetup(#[source] std::io::Error),

    /// The process could not be started.
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        /// The command that was being launched.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the process failed.
    #[error("Failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero status.
    #[error("'{command}' exited with status {code}")]
    ExitCode { command: String, code: i32 },

    /// The process was killed by a signal other than SIGINT/SIGTERM.
    #[error("'{command}' was killed by {signal}")]
    Signaled { command: String, signal: Signal },
}
