//! Terminal handoff tests
//!
//! Launches real (short) shell commands through the handoff controller with a
//! terminal double that records when it was released and reacquired.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use launchdeck::config::{Application, Config, ConfigStore};
use launchdeck::launch::{
    HandoffController, HandoffState, LaunchFailure, LaunchOutcome, PendingLaunch,
};
use launchdeck::registry::PanelId;
use launchdeck::session::{run_session, EventReader, ShutdownSignals};
use launchdeck::ui::app::{DashboardSnapshot, StatusLevel};
use launchdeck::ui::terminal::TerminalControl;
use launchdeck::ui::theme::Theme;
use launchdeck::ui::{project, App};
use nix::sys::signal::Signal;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Terminal double that checks for a marker file written by the child.
struct RecordingTerminal {
    marker: PathBuf,
    log: Vec<String>,
    suspended: bool,
}

impl RecordingTerminal {
    fn new(marker: PathBuf) -> Self {
        Self {
            marker,
            log: Vec::new(),
            suspended: false,
        }
    }
}

impl TerminalControl for RecordingTerminal {
    fn draw(&mut self, app: &App) -> Result<()> {
        assert!(!self.suspended, "drew while the child owned the terminal");
        project(app, 80, 24);
        self.log.push("draw".to_string());
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.suspended = true;
        self.log
            .push(format!("suspend marker={}", self.marker.exists()));
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.suspended = false;
        self.log.push(format!("resume marker={}", self.marker.exists()));
        Ok(())
    }
}

struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    fn new(codes: &[KeyCode]) -> Self {
        Self {
            events: codes
                .iter()
                .map(|c| Event::Key(KeyEvent::new(*c, KeyModifiers::empty())))
                .collect(),
        }
    }
}

impl EventReader for ScriptedEvents {
    fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => anyhow::bail!("event script exhausted"),
        }
    }
}

fn app_with(applications: Vec<Application>) -> App {
    let config = Config {
        applications,
        places: Vec::new(),
        theme: None,
    };
    let store = ConfigStore::in_memory("/dev/null/launchdeck/config.json", config);
    let mut app = App::new(
        store,
        Theme::default_theme().clone(),
        DashboardSnapshot {
            time: "now".to_string(),
            host: "host".to_string(),
            dir: "/".to_string(),
        },
    );
    app.launch_in_dir = false;
    app
}

#[tokio::test]
async fn test_terminal_released_before_child_and_restored_after() {
    let temp_dir = TempDir::new().unwrap();
    let marker = temp_dir.path().join("ran");
    let mut terminal = RecordingTerminal::new(marker.clone());
    let mut controller = HandoffController::new();

    let launch = PendingLaunch::command("touch", format!("touch '{}'", marker.display()));
    let outcome = controller.hand_off(&mut terminal, launch).await.unwrap();

    assert!(matches!(outcome, LaunchOutcome::Completed));
    assert_eq!(
        terminal.log,
        vec!["suspend marker=false", "resume marker=true"]
    );
    assert_eq!(controller.state(), HandoffState::Interactive);
}

#[tokio::test]
async fn test_child_killed_by_sigint_is_not_an_error() {
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();

    let outcome = controller
        .hand_off(&mut terminal, PendingLaunch::command("int", "kill -INT $$"))
        .await
        .unwrap();

    assert!(matches!(outcome, LaunchOutcome::Interrupted(Signal::SIGINT)));
    assert!(outcome.is_normal());
    assert!(!terminal.suspended);
    assert_eq!(controller.state(), HandoffState::Interactive);
}

#[tokio::test]
async fn test_nonzero_exit_is_reported_and_terminal_resumes() {
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();

    let outcome = controller
        .hand_off(&mut terminal, PendingLaunch::command("fail", "exit 3"))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        LaunchOutcome::Failed(LaunchFailure::ExitCode { code: 3, .. })
    ));
    assert!(!terminal.suspended);
    assert_eq!(controller.state(), HandoffState::Interactive);
}

#[tokio::test]
async fn test_missing_program_is_a_failure() {
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();

    let outcome = controller
        .hand_off(
            &mut terminal,
            PendingLaunch::command("missing", "launchdeck-no-such-program-xyz"),
        )
        .await
        .unwrap();

    // sh reports "command not found" as exit status 127
    assert!(matches!(
        outcome,
        LaunchOutcome::Failed(LaunchFailure::ExitCode { code: 127, .. })
    ));
}

#[tokio::test]
async fn test_terminated_controller_refuses_launch() {
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();
    controller.terminate();

    let result = controller
        .hand_off(&mut terminal, PendingLaunch::command("ok", "exit 0"))
        .await;
    assert!(result.is_err());
    assert!(terminal.log.is_empty());
}

#[tokio::test]
async fn test_session_resumes_with_focus_and_cursor_intact() {
    let mut app = app_with(vec![
        Application::new("Ok", "exit 0"),
        Application::new("Fail", "exit 4"),
    ]);
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();
    let mut events = ScriptedEvents::new(&[
        KeyCode::Tab,
        KeyCode::Down,
        KeyCode::Enter,
        KeyCode::Char('q'),
    ]);

    let mut shutdown = ShutdownSignals::disabled();
    run_session(
        &mut terminal,
        &mut app,
        &mut events,
        &mut shutdown,
        &mut controller,
    )
    .await
    .unwrap();

    assert_eq!(app.focus.focused(), PanelId::Applications);
    assert_eq!(app.focus.current(), 1);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("exited with status 4"));
    assert_eq!(controller.state(), HandoffState::Terminated);

    let suspends = terminal.log.iter().filter(|l| l.starts_with("suspend")).count();
    let resumes = terminal.log.iter().filter(|l| l.starts_with("resume")).count();
    assert_eq!((suspends, resumes), (1, 1));
    assert_eq!(terminal.log.last().map(String::as_str), Some("draw"));
}

#[tokio::test]
async fn test_session_runs_several_launches() {
    let mut app = app_with(vec![Application::new("Ok", "exit 0")]);
    let mut terminal = RecordingTerminal::new(PathBuf::from("/nonexistent"));
    let mut controller = HandoffController::new();
    let mut events = ScriptedEvents::new(&[
        KeyCode::Tab,
        KeyCode::Enter,
        KeyCode::Enter,
        KeyCode::Char('q'),
    ]);

    let mut shutdown = ShutdownSignals::disabled();
    run_session(
        &mut terminal,
        &mut app,
        &mut events,
        &mut shutdown,
        &mut controller,
    )
    .await
    .unwrap();

    let resumes = terminal.log.iter().filter(|l| l.starts_with("resume")).count();
    assert_eq!(resumes, 2);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Info);
    assert_eq!(status.text, "Ok finished");
}
