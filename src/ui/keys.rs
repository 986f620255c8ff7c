//! Keyboard input mapping.
//!
//! Keys are translated into a small closed set of logical [`Action`]s; what an
//! action does is decided by [`App::dispatch`](crate::ui::App::dispatch) from
//! the current mode and focused panel.
//!
//! # Keybindings
//!
//! | Key | Browsing | Adding an application |
//! |-----|----------|-----------------------|
//! | `q` / `Q` | Quit | type |
//! | `Ctrl+C` | Quit | Quit |
//! | Tab / Shift+Tab | Cycle panel focus | Switch field |
//! | `k` / Up | Move up | type `k` / - |
//! | `j` / Down | Move down | type `j` / - |
//! | Enter | Preview or launch | Next field / save |
//! | `a` | Add application | type |
//! | `r` | Refresh dashboard | type |
//! | `o` | Open shell in place | type |
//! | Esc | Clear preview | Cancel |
//! | Backspace | - | Delete character |

use crate::registry::Entry;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CycleFocus,
    CycleFocusBack,
    MoveUp,
    MoveDown,
    Activate,
    AddEntry,
    Cancel,
    Refresh,
    OpenShell,
    InsertChar(char),
    DeleteChar,
}

/// Key bindings shown in the shortcuts panel, in display order.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Tab", "Cycle focus between panels (Shift+Tab goes back)"),
    ("Up/Down", "Move the selection (also k/j)"),
    ("Enter", "Launch an application or preview the selection"),
    ("a", "Add an application to the config"),
    ("o", "Open a shell in the selected place"),
    ("r", "Refresh the dashboard"),
    ("Esc", "Clear the preview or cancel the form"),
    ("q", "Quit (Ctrl+C works everywhere)"),
];

/// Entries for the shortcuts panel.
pub fn shortcut_entries() -> Vec<Entry> {
    KEY_BINDINGS
        .iter()
        .map(|(keys, help)| Entry::info(format!("Keys: {keys}"), *help))
        .collect()
}

/// Map a key press to an action. `editing` is true while the add form is
/// open.
pub fn action_for(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if has_ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Some(Action::Quit);
    }

    if editing {
        return match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::CycleFocus),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) if !has_ctrl => Some(Action::InsertChar(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Tab => Some(Action::CycleFocus),
        KeyCode::BackTab => Some(Action::CycleFocusBack),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char('a') => Some(Action::AddEntry),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('o') => Some(Action::OpenShell),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}
