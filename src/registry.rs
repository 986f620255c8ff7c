//! # Panel Registry
//!
//! The fixed, ordered set of panels shown on the left side of the dashboard
//! and the entries each one holds.
//!
//! | Panel | Source | Activation |
//! |-------|--------|------------|
//! | [`PanelId::Places`] | `places` in the config | preview |
//! | [`PanelId::Applications`] | `applications` in the config | launch |
//! | [`PanelId::Shortcuts`] | the key map | preview |

use crate::config::{Application, Config, Place};
use std::path::PathBuf;

/// Identifies one of the dashboard panels. Declaration order is focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Places,
    Applications,
    Shortcuts,
}

impl PanelId {
    /// All panels in focus-cycle order.
    pub const ALL: [PanelId; 3] = [PanelId::Places, PanelId::Applications, PanelId::Shortcuts];

    /// Position of the panel in [`PanelId::ALL`].
    pub fn index(self) -> usize {
        match self {
            PanelId::Places => 0,
            PanelId::Applications => 1,
            PanelId::Shortcuts => 2,
        }
    }

    /// Next panel in the focus cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            PanelId::Places => PanelId::Applications,
            PanelId::Applications => PanelId::Shortcuts,
            PanelId::Shortcuts => PanelId::Places,
        }
    }

    /// Previous panel in the focus cycle.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            PanelId::Places => PanelId::Shortcuts,
            PanelId::Applications => PanelId::Places,
            PanelId::Shortcuts => PanelId::Applications,
        }
    }

    /// Border title of the panel.
    pub fn title(self) -> &'static str {
        match self {
            PanelId::Places => "Places",
            PanelId::Applications => "Applications",
            PanelId::Shortcuts => "Shortcuts",
        }
    }

    /// Singular noun used when a preview title has no explicit category.
    pub fn noun(self) -> &'static str {
        match self {
            PanelId::Places => "Place",
            PanelId::Applications => "Application",
            PanelId::Shortcuts => "Shortcut",
        }
    }

    /// What activating an entry of this panel does.
    pub fn policy(self) -> ActivationPolicy {
        match self {
            PanelId::Applications => ActivationPolicy::Launch,
            PanelId::Places | PanelId::Shortcuts => ActivationPolicy::Preview,
        }
    }
}

/// Static per-panel activation behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// Show a preview of the entry in the detail pane.
    Preview,
    /// Hand the terminal to the entry's command.
    Launch,
}

/// What an entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTarget {
    Command(String),
    Path(PathBuf),
}

/// One selectable row of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub description: Option<String>,
    pub target: Option<EntryTarget>,
}

impl Entry {
    /// An informational entry with no target.
    pub fn info(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            target: None,
        }
    }

    pub fn command(&self) -> Option<&str> {
        match &self.target {
            Some(EntryTarget::Command(command)) => Some(command),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match &self.target {
            Some(EntryTarget::Path(path)) => Some(path),
            _ => None,
        }
    }
}

impl From<&Application> for Entry {
    fn from(app: &Application) -> Self {
        Self {
            name: app.name.clone(),
            description: app.description.clone(),
            target: Some(EntryTarget::Command(app.command.clone())),
        }
    }
}

impl From<&Place> for Entry {
    fn from(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            description: place.description.clone(),
            target: Some(EntryTarget::Path(PathBuf::from(&place.path))),
        }
    }
}

/// A panel and its entries.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: PanelId,
    pub entries: Vec<Entry>,
}

impl Panel {
    pub fn new(id: PanelId, entries: Vec<Entry>) -> Self {
        Self { id, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }
}

/// All panels, indexed by [`PanelId`].
#[derive(Debug, Clone)]
pub struct PanelRegistry {
    panels: [Panel; 3],
}

impl PanelRegistry {
    /// Build the registry. `shortcuts` fills the shortcuts panel.
    pub fn new(places: Vec<Entry>, applications: Vec<Entry>, shortcuts: Vec<Entry>) -> Self {
        Self {
            panels: [
                Panel::new(PanelId::Places, places),
                Panel::new(PanelId::Applications, applications),
                Panel::new(PanelId::Shortcuts, shortcuts),
            ],
        }
    }

    pub fn from_config(config: &Config, shortcuts: Vec<Entry>) -> Self {
        Self::new(
            config.places.iter().map(Entry::from).collect(),
            config.applications.iter().map(Entry::from).collect(),
            shortcuts,
        )
    }

    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Append an entry to a panel, keeping existing order.
    pub fn append(&mut self, id: PanelId, entry: Entry) {
        self.panels[id.index()].entries.push(entry);
    }
}
