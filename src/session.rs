//! # Session Loop
//!
//! Alternates between the interactive dashboard and launched programs for the
//! whole lifetime of the process:
//!
//! 1. [`run_interactive`] draws and dispatches keys until the user quits or an
//!    activation leaves a pending launch behind.
//! 2. The [`HandoffController`] gives the terminal to the launched program and
//!    takes it back once it exits.
//! 3. The same [`App`] goes back into step 1, focus and cursors untouched.
//!
//! SIGINT and SIGTERM are watched by [`ShutdownSignals`] for the whole
//! session. While the dashboard owns the terminal they quit it cleanly; while
//! a child runs they belong to the child and are only forwarded.

use crate::launch::{HandoffController, PendingLaunch};
use crate::ui::keys::Action;
use crate::ui::terminal::TerminalControl;
use crate::ui::App;
use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use nix::sys::signal::Signal;
use std::task::{Context as TaskContext, Poll, Waker};
use std::time::Duration;
use tokio::signal::unix::{signal, Signal as SignalStream, SignalKind};
use tracing::{debug, info};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Trait for reading terminal events (allows dependency injection for testing)
pub trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
pub struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Session-long SIGINT/SIGTERM listeners.
///
/// Checked without awaiting, so deliveries only show up while some runtime
/// thread is free to drive the signal driver (the binary uses the
/// multi-threaded runtime).
pub struct ShutdownSignals {
    streams: Vec<(Signal, SignalStream)>,
}

impl ShutdownSignals {
    /// Install the listeners. Must be called from inside the tokio runtime.
    pub fn install() -> Result<Self> {
        let interrupt =
            signal(SignalKind::interrupt()).context("Failed to listen for SIGINT")?;
        let terminate =
            signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
        Ok(Self {
            streams: vec![(Signal::SIGINT, interrupt), (Signal::SIGTERM, terminate)],
        })
    }

    /// No listeners; [`ShutdownSignals::pending`] never reports anything.
    pub fn disabled() -> Self {
        Self {
            streams: Vec::new(),
        }
    }

    /// The first signal received since the last check, if any.
    pub fn pending(&mut self) -> Option<Signal> {
        let mut cx = TaskContext::from_waker(Waker::noop());
        let mut received = None;
        for (kind, stream) in &mut self.streams {
            while let Poll::Ready(Some(())) = stream.poll_recv(&mut cx) {
                if received.is_none() {
                    received = Some(*kind);
                }
            }
        }
        received
    }

    /// Forget deliveries that were already forwarded to a child.
    pub fn clear(&mut self) {
        if let Some(signal) = self.pending() {
            debug!(%signal, "dropping signal already forwarded to the child");
        }
    }
}

/// Why the interactive loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Launch(PendingLaunch),
}

/// Draw and handle input until the user quits, a shutdown signal arrives, or
/// something must be launched.
pub fn run_interactive<T>(
    terminal: &mut T,
    app: &mut App,
    events: &mut dyn EventReader,
    shutdown: &mut ShutdownSignals,
) -> Result<LoopExit>
where
    T: TerminalControl + ?Sized,
{
    loop {
        terminal.draw(app)?;

        if let Some(Event::Key(key)) = events.read_event(POLL_TIMEOUT)? {
            app.handle_key(key);
        }

        if let Some(signal) = shutdown.pending() {
            info!(%signal, "shutdown requested");
            app.dispatch(Action::Quit);
        }

        if app.should_quit {
            return Ok(LoopExit::Quit);
        }
        if let Some(launch) = app.take_pending_launch() {
            return Ok(LoopExit::Launch(launch));
        }
    }
}

/// Run the dashboard until the user quits.
pub async fn run_session<T>(
    terminal: &mut T,
    app: &mut App,
    events: &mut dyn EventReader,
    shutdown: &mut ShutdownSignals,
    controller: &mut HandoffController,
) -> Result<()>
where
    T: TerminalControl + ?Sized,
{
    loop {
        match run_interactive(terminal, app, events, shutdown)? {
            LoopExit::Quit => {
                controller.terminate();
                debug!("session finished");
                return Ok(());
            }
            LoopExit::Launch(launch) => {
                let name = launch.name.clone();
                let outcome = controller.hand_off(terminal, launch).await?;
                shutdown.clear();
                app.record_outcome(&name, &outcome);
            }
        }
    }
}
