//! Turns the highlighted entry of the focused panel into a preview or a
//! launch request, following each panel's [`ActivationPolicy`].

use crate::launch::PendingLaunch;
use crate::registry::{ActivationPolicy, Entry, EntryTarget, PanelId, PanelRegistry};
use crate::ui::focus::FocusState;

/// Text shown in the detail pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    Preview(Preview),
    Launch(PendingLaunch),
}

/// Activate the focused panel's current entry. `None` when the panel is
/// empty.
pub fn activate(registry: &PanelRegistry, focus: &FocusState) -> Option<ActivationResult> {
    let panel = registry.panel(focus.focused());
    let entry = panel.get(focus.current())?;

    match (panel.id.policy(), entry.command()) {
        (ActivationPolicy::Launch, Some(command)) => Some(ActivationResult::Launch(
            PendingLaunch::command(entry.name.clone(), command),
        )),
        _ => Some(ActivationResult::Preview(preview(panel.id, entry))),
    }
}

/// Build the preview for an entry.
pub fn preview(panel: PanelId, entry: &Entry) -> Preview {
    Preview {
        title: preview_title(panel, &entry.name),
        body: preview_body(entry),
    }
}

/// `"Category: Widget"` becomes `"Category Preview: Widget"`; a name without
/// a category uses the panel's noun instead.
pub fn preview_title(panel: PanelId, name: &str) -> String {
    match name.split_once(':') {
        Some((category, short)) if !category.trim().is_empty() => {
            format!("{} Preview: {}", category.trim(), short.trim())
        }
        _ => format!("{} Preview: {}", panel.noun(), name.trim()),
    }
}

fn preview_body(entry: &Entry) -> String {
    if let Some(description) = entry.description.as_deref().filter(|d| !d.trim().is_empty()) {
        return description.to_string();
    }
    match &entry.target {
        Some(EntryTarget::Path(path)) => format!("Path: {}", path.display()),
        Some(EntryTarget::Command(command)) => format!("Command: {command}"),
        None => "No description available.".to_string(),
    }
}
