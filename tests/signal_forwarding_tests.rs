//! Signal forwarding tests
//!
//! Sends SIGTERM and SIGINT to this test process while a child owns the
//! terminal. Kept in its own test binary, with a single test, so no other
//! test observes the signals.

use anyhow::Result;
use launchdeck::launch::{HandoffController, HandoffState, LaunchOutcome, PendingLaunch};
use launchdeck::ui::terminal::TerminalControl;
use launchdeck::ui::App;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::thread;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};

#[derive(Default)]
struct NullTerminal {
    suspends: usize,
    resumes: usize,
}

impl TerminalControl for NullTerminal {
    fn draw(&mut self, _app: &App) -> Result<()> {
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.suspends += 1;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.resumes += 1;
        Ok(())
    }
}

/// Deliver `signal` to this process once the child had time to start.
fn signal_self_later(signal: Signal) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        kill(Pid::this(), signal).unwrap();
    })
}

#[tokio::test]
async fn test_signals_are_forwarded_to_running_child() {
    // Keep handlers installed for the whole test so a signal that arrives
    // between launches cannot kill the test process.
    let _sigterm_guard = signal(SignalKind::terminate()).unwrap();
    let _sigint_guard = signal(SignalKind::interrupt()).unwrap();

    let mut terminal = NullTerminal::default();
    let mut controller = HandoffController::new();

    for sig in [Signal::SIGTERM, Signal::SIGINT] {
        let sender = signal_self_later(sig);
        let outcome = controller
            .hand_off(&mut terminal, PendingLaunch::command("sleeper", "exec sleep 30"))
            .await
            .unwrap();
        sender.join().unwrap();

        match outcome {
            LaunchOutcome::Interrupted(got) => assert_eq!(got, sig),
            other => panic!("expected child interrupted by {sig}, got {other:?}"),
        }
        assert_eq!(controller.state(), HandoffState::Interactive);
    }

    assert_eq!((terminal.suspends, terminal.resumes), (2, 2));
}
