use crate::config::ConfigStore;
use crate::launch::{self, LaunchOutcome, PendingLaunch, ShellRequest};
use crate::registry::{Entry, PanelId, PanelRegistry};
use crate::ui::activation::{self, ActivationResult, Preview};
use crate::ui::focus::{Direction, FocusState};
use crate::ui::form::{AddForm, FormField};
use crate::ui::keys::{self, Action};
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;
use tracing::{debug, error};

/// Top-level input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    EditingNewEntry(AddForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line notice shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Time, host and working directory shown at the top of the dashboard pane.
///
/// Captured explicitly so rendering never reads the clock or the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub time: String,
    pub host: String,
    pub dir: String,
}

impl DashboardSnapshot {
    pub fn capture() -> Self {
        let host = nix::unistd::gethostname()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string());
        let dir = std::env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "?".to_string());
        Self {
            time: chrono::Local::now()
                .format("%a %b %-d, %Y %H:%M:%S")
                .to_string(),
            host,
            dir,
        }
    }
}

pub struct App {
    pub registry: PanelRegistry,
    pub focus: FocusState,
    pub mode: Mode,
    /// Last activation preview shown in the detail pane.
    pub preview: Option<Preview>,
    pub dashboard: DashboardSnapshot,
    pub status: Option<StatusMessage>,
    pub theme: Theme,
    pub should_quit: bool,
    /// Whether "open shell in place" really launches a shell.
    pub launch_in_dir: bool,
    pending_launch: Option<PendingLaunch>,
    store: ConfigStore,
}

impl App {
    pub fn new(store: ConfigStore, theme: Theme, dashboard: DashboardSnapshot) -> Self {
        let registry = PanelRegistry::from_config(store.config(), keys::shortcut_entries());
        Self {
            registry,
            focus: FocusState::new(),
            mode: Mode::Browsing,
            preview: None,
            dashboard,
            status: None,
            theme,
            should_quit: false,
            launch_in_dir: launch::launch_in_dir_enabled(),
            pending_launch: None,
            store,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::EditingNewEntry(_))
    }

    /// Highlighted entry of the focused panel.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.registry
            .panel(self.focus.focused())
            .get(self.focus.current())
    }

    pub fn has_pending_launch(&self) -> bool {
        self.pending_launch.is_some()
    }

    /// Hand out the pending launch. Each request is returned exactly once.
    pub fn take_pending_launch(&mut self) -> Option<PendingLaunch> {
        self.pending_launch.take()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = keys::action_for(key, self.is_editing()) {
            self.dispatch(action);
        }
    }

    /// Apply one action to the current mode.
    pub fn dispatch(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if self.is_editing() {
            self.dispatch_editing(action);
        } else {
            self.dispatch_browsing(action);
        }
    }

    fn dispatch_browsing(&mut self, action: Action) {
        match action {
            Action::CycleFocus => self.focus.cycle_focus(),
            Action::CycleFocusBack => self.focus.cycle_focus_back(),
            Action::MoveUp => self.move_cursor(Direction::Up),
            Action::MoveDown => self.move_cursor(Direction::Down),
            Action::Activate => self.activate(),
            Action::AddEntry => self.open_add_form(),
            Action::Refresh => self.refresh(),
            Action::OpenShell => self.open_shell(),
            Action::Cancel => {
                self.preview = None;
                self.status = None;
            }
            Action::Quit | Action::InsertChar(_) | Action::DeleteChar => {}
        }
    }

    fn dispatch_editing(&mut self, action: Action) {
        let Mode::EditingNewEntry(form) = &mut self.mode else {
            return;
        };
        match action {
            Action::InsertChar(c) => form.insert(c),
            Action::DeleteChar => form.delete(),
            Action::CycleFocus | Action::CycleFocusBack => form.switch_field(),
            Action::Activate if form.field == FormField::Name => form.switch_field(),
            Action::Activate => self.submit_form(),
            Action::Cancel => self.mode = Mode::Browsing,
            _ => {}
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        let len = self.registry.panel(self.focus.focused()).len();
        self.focus.move_cursor(direction, len);
    }

    /// Preview or launch the highlighted entry. A no-op on an empty panel.
    pub fn activate(&mut self) {
        if self.pending_launch.is_some() {
            debug!("launch already pending, ignoring activation");
            return;
        }
        match activation::activate(&self.registry, &self.focus) {
            Some(ActivationResult::Preview(preview)) => self.preview = Some(preview),
            Some(ActivationResult::Launch(launch)) => self.pending_launch = Some(launch),
            None => {}
        }
    }

    fn open_add_form(&mut self) {
        if self.focus.focused() != PanelId::Applications {
            self.set_status(StatusLevel::Info, "Focus Applications to add an entry");
            return;
        }
        self.mode = Mode::EditingNewEntry(AddForm::new());
    }

    fn submit_form(&mut self) {
        let Mode::EditingNewEntry(form) = &self.mode else {
            return;
        };
        let Some(application) = form.to_application() else {
            self.set_status(StatusLevel::Error, "Name and command are both required");
            return;
        };

        let entry = Entry::from(&application);
        let name = application.name.clone();
        match self.store.append_application(application) {
            Ok(()) => self.set_status(StatusLevel::Info, format!("Added {name}")),
            Err(e) => {
                error!(path = %self.store.path().display(), "failed to write config: {e:#}");
                self.set_status(
                    StatusLevel::Error,
                    format!("Added {name} for this session only: {e:#}"),
                );
            }
        }
        self.registry.append(PanelId::Applications, entry);
        let len = self.registry.panel(PanelId::Applications).len();
        self.focus.clamp(PanelId::Applications, len);
        self.mode = Mode::Browsing;
    }

    fn open_shell(&mut self) {
        if self.focus.focused() != PanelId::Places || self.pending_launch.is_some() {
            return;
        }
        let Some((name, path)) = self
            .selected_entry()
            .and_then(|e| e.path().map(|p| (e.name.clone(), p.clone())))
        else {
            return;
        };

        match launch::shell_in_dir(&name, &path, self.launch_in_dir) {
            ShellRequest::Launch(launch) => self.pending_launch = Some(launch),
            ShellRequest::DryRun(message) => self.set_status(StatusLevel::Info, message),
            ShellRequest::MissingDirectory(dir) => self.set_status(
                StatusLevel::Error,
                format!("Directory does not exist: {}", dir.display()),
            ),
        }
    }

    /// Re-capture the dashboard snapshot.
    pub fn refresh(&mut self) {
        self.dashboard = DashboardSnapshot::capture();
        self.status = None;
    }

    /// Report how a launch ended in the footer.
    pub fn record_outcome(&mut self, name: &str, outcome: &LaunchOutcome) {
        match outcome {
            LaunchOutcome::Completed => {
                self.set_status(StatusLevel::Info, format!("{name} finished"));
            }
            LaunchOutcome::Interrupted(signal) => {
                self.set_status(StatusLevel::Info, format!("{name} stopped ({signal})"));
            }
            LaunchOutcome::Failed(failure) => {
                self.set_status(StatusLevel::Error, failure.to_string());
            }
        }
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Application, Config};

    fn test_app() -> App {
        let config = Config {
            applications: vec![
                Application::new("Htop", "htop"),
                Application::new("Vim", "vim"),
            ],
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

    #[test]
    fn test_activate_on_empty_places_keeps_preview() {
        let mut app = test_app();
        app.preview = Some(Preview {
            title: "Before".to_string(),
            body: "unchanged".to_string(),
        });
        app.dispatch(Action::Activate);
        assert_eq!(app.preview.as_ref().map(|p| p.title.as_str()), Some("Before"));
        assert!(!app.has_pending_launch());
    }

    #[test]
    fn test_pending_launch_taken_once() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::MoveDown);
        app.dispatch(Action::Activate);
        assert_eq!(
            app.take_pending_launch(),
            Some(PendingLaunch::command("Vim", "vim"))
        );
        assert_eq!(app.take_pending_launch(), None);
    }

    #[test]
    fn test_second_activation_does_not_replace_pending() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::Activate);
        app.dispatch(Action::MoveDown);
        app.dispatch(Action::Activate);
        assert_eq!(
            app.take_pending_launch(),
            Some(PendingLaunch::command("Htop", "htop"))
        );
    }

    #[test]
    fn test_add_only_from_applications() {
        let mut app = test_app();
        app.dispatch(Action::AddEntry);
        assert!(!app.is_editing());
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::AddEntry);
        assert!(app.is_editing());
    }

    #[test]
    fn test_submit_with_blank_command_keeps_form() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::AddEntry);
        app.dispatch(Action::InsertChar('x'));
        app.dispatch(Action::Activate);
        app.dispatch(Action::Activate);
        assert!(app.is_editing());
        assert_eq!(
            app.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        );
    }

    #[test]
    fn test_failed_save_keeps_entry_in_memory() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::AddEntry);
        for c in "Top".chars() {
            app.dispatch(Action::InsertChar(c));
        }
        app.dispatch(Action::CycleFocus);
        for c in "top".chars() {
            app.dispatch(Action::InsertChar(c));
        }
        app.dispatch(Action::Activate);

        assert!(!app.is_editing());
        let apps = app.registry.panel(PanelId::Applications);
        assert_eq!(apps.len(), 3);
        assert_eq!(apps.entries[2].name, "Top");
        assert_eq!(
            app.status.as_ref().map(|s| s.level),
            Some(StatusLevel::Error)
        );
    }

    #[test]
    fn test_cancel_form_returns_to_browsing() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::AddEntry);
        app.dispatch(Action::InsertChar('q'));
        assert!(!app.should_quit);
        app.dispatch(Action::Cancel);
        assert_eq!(app.mode, Mode::Browsing);
        assert_eq!(app.registry.panel(PanelId::Applications).len(), 2);
    }

    #[test]
    fn test_quit_from_any_mode() {
        let mut app = test_app();
        app.dispatch(Action::CycleFocus);
        app.dispatch(Action::AddEntry);
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
