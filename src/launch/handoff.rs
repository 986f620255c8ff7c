//! # Process Handoff
//!
//! Hands the terminal from the dashboard to a child process and back.
//!
//! ```text
//! Interactive ──launch──▶ Suspending ──▶ ChildRunning ──exit──▶ Resuming ──▶ Interactive
//!      │
//!      └──quit──▶ Terminated
//! ```
//!
//! The terminal is released (raw mode off, alternate screen left) before the
//! child is spawned, so the child starts on a clean cooked-mode terminal with
//! the real stdin/stdout/stderr. While it runs, SIGINT and SIGTERM delivered to
//! the dashboard are forwarded to the child instead of ending the dashboard.
//!
//! A child that ends because of one of those signals exited normally. Any
//! other failure is logged and reported, and the dashboard always resumes.

use super::error::LaunchFailure;
use super::PendingLaunch;
use crate::ui::terminal::TerminalControl;
use anyhow::Result;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, info, warn};

/// Who owns the terminal right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    /// The dashboard owns the terminal.
    Interactive,
    /// The dashboard is releasing the terminal.
    Suspending,
    /// A child process owns the terminal.
    ChildRunning,
    /// The dashboard is taking the terminal back.
    Resuming,
    /// The dashboard has quit.
    Terminated,
}

/// How a launched program ended.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// Exit status 0.
    Completed,
    /// Ended by SIGINT or SIGTERM. Not an error.
    Interrupted(Signal),
    /// Anything else.
    Failed(LaunchFailure),
}

impl LaunchOutcome {
    /// Whether the outcome counts as a normal exit.
    pub fn is_normal(&self) -> bool {
        !matches!(self, LaunchOutcome::Failed(_))
    }
}

/// Drives one launch at a time through [`HandoffState`].
#[derive(Debug)]
pub struct HandoffController {
    state: HandoffState,
}

impl Default for HandoffController {
    fn default() -> Self {
        Self::new()
    }
}

impl HandoffController {
    pub fn new() -> Self {
        Self {
            state: HandoffState::Interactive,
        }
    }

    pub fn state(&self) -> HandoffState {
        self.state
    }

    /// Mark the dashboard as finished. No further handoffs are accepted.
    pub fn terminate(&mut self) {
        self.state = HandoffState::Terminated;
    }

    /// Run `launch` in the foreground and give the terminal back afterwards.
    ///
    /// Only terminal errors are returned; everything about the child itself is
    /// folded into the [`LaunchOutcome`].
    pub async fn hand_off<T>(
        &mut self,
        terminal: &mut T,
        launch: PendingLaunch,
    ) -> Result<LaunchOutcome>
    where
        T: TerminalControl + ?Sized,
    {
        if self.state != HandoffState::Interactive {
            anyhow::bail!("Cannot launch '{}' while {:?}", launch.name, self.state);
        }

        self.state = HandoffState::Suspending;
        terminal.suspend()?;

        self.state = HandoffState::ChildRunning;
        info!(name = %launch.name, target = %launch.target, "launching");
        let outcome = run_child(&launch).await;
        report(&launch, &outcome);

        self.state = HandoffState::Resuming;
        terminal.resume()?;

        self.state = HandoffState::Interactive;
        Ok(outcome)
    }
}

/// Spawn the child with inherited stdio, forward signals until it exits and
/// classify the result.
pub async fn run_child(launch: &PendingLaunch) -> LaunchOutcome {
    let command_text = launch.target.to_string();

    // Listeners go in before the spawn so no signal can slip past.
    let mut interrupt = match signal(SignalKind::interrupt()) {
        Ok(stream) => stream,
        Err(e) => return LaunchOutcome::Failed(LaunchFailure::SignalSetup(e)),
    };
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => return LaunchOutcome::Failed(LaunchFailure::SignalSetup(e)),
    };

    let mut command = launch.target.to_command();
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(source) => {
            return LaunchOutcome::Failed(LaunchFailure::Spawn {
                command: command_text,
                source,
            })
        }
    };
    let pid = child.id();
    debug!(?pid, "child started");

    let mut forwarded = None;
    let waited = loop {
        tokio::select! {
            status = child.wait() => break status,
            Some(()) = interrupt.recv() => {
                forward_signal(pid, Signal::SIGINT);
                forwarded = Some(Signal::SIGINT);
            }
            Some(()) = terminate.recv() => {
                forward_signal(pid, Signal::SIGTERM);
                forwarded = Some(Signal::SIGTERM);
            }
        }
    };

    match waited {
        Ok(status) => classify(&command_text, status, forwarded),
        Err(source) => LaunchOutcome::Failed(LaunchFailure::Wait {
            command: command_text,
            source,
        }),
    }
}

fn forward_signal(pid: Option<u32>, signal: Signal) {
    let Some(raw) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    match kill(Pid::from_raw(raw), signal) {
        Ok(()) => debug!(pid = raw, %signal, "forwarded signal to child"),
        Err(e) => warn!(pid = raw, %signal, "failed to forward signal: {e}"),
    }
}

/// Classify an exit status.
///
/// `forwarded` is the last signal passed on to the child. A shell that traps
/// the signal and exits with `128 + n` is treated like a child killed by it.
pub fn classify(command: &str, status: ExitStatus, forwarded: Option<Signal>) -> LaunchOutcome {
    if status.success() {
        return LaunchOutcome::Completed;
    }

    if let Some(raw) = status.signal() {
        return match Signal::try_from(raw) {
            Ok(sig @ (Signal::SIGINT | Signal::SIGTERM)) => LaunchOutcome::Interrupted(sig),
            Ok(sig) => LaunchOutcome::Failed(LaunchFailure::Signaled {
                command: command.to_string(),
                signal: sig,
            }),
            Err(_) => LaunchOutcome::Failed(LaunchFailure::ExitCode {
                command: command.to_string(),
                code: 128 + raw,
            }),
        };
    }

    let code = status.code().unwrap_or(1);
    match forwarded {
        Some(sig) if code == 128 + sig as i32 => LaunchOutcome::Interrupted(sig),
        _ => LaunchOutcome::Failed(LaunchFailure::ExitCode {
            command: command.to_string(),
            code,
        }),
    }
}

fn report(launch: &PendingLaunch, outcome: &LaunchOutcome) {
    match outcome {
        LaunchOutcome::Completed => info!(name = %launch.name, "finished"),
        LaunchOutcome::Interrupted(signal) => {
            info!(name = %launch.name, %signal, "stopped by signal");
        }
        LaunchOutcome::Failed(failure) => warn!(name = %launch.name, "launch failed: {failure}"),
    }
}
