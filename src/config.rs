//! # Configuration Persistence
//!
//! Manages the launcher configuration stored in
//! `~/.config/launchdeck/config.json` (or the file passed with `--config`).
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file. It
//! holds the list of launchable applications, the places shown in the
//! navigation panel and the selected theme name.
//!
//! ```json
//! {
//!   "applications": [
//!     { "name": "LazyGit", "command": "lazygit" }
//!   ],
//!   "places": [
//!     { "name": "Places: Home", "path": "~" }
//!   ]
//! }
//! ```
//!
//! Unlike a settings file, a broken config is not silently replaced: a file
//! that exists but cannot be read or parsed is a startup error. A missing file
//! is created with [`Config::default`].
//!
//! [`ConfigStore`] is the single owner of the loaded configuration. Appending
//! an application goes through it so the in-memory list and the file never
//! diverge in order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A launchable application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Application {
    /// Display name shown in the applications panel.
    pub name: String,
    /// Shell command line, run with `sh -c`.
    pub command: String,
    /// Optional text shown in the preview pane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Application {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: None,
        }
    }
}

/// A directory bookmark shown in the places panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Place {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Persisted launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Applications in display order.
    #[serde(default)]
    pub applications: Vec<Application>,

    /// Directory bookmarks for the places panel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,

    /// Name of the colour theme (must match a built-in theme name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            applications: vec![
                Application::new("LazyGit", "lazygit"),
                Application::new("LazyDocker", "lazydocker"),
                Application::new("LazySSH", "lazyssh"),
            ],
            places: vec![
                Place {
                    name: "Places: Home".to_string(),
                    path: "~".to_string(),
                    description: None,
                },
                Place {
                    name: "Places: Working Directory".to_string(),
                    path: ".".to_string(),
                    description: None,
                },
            ],
            theme: None,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration to a specific path, replacing the whole file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Return the default path to the config file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "launchdeck")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

/// Owns the loaded [`Config`] together with the file it came from.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Load the config at `path`, creating and persisting the default set when
    /// the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = if path.exists() {
            let config = Config::load_from(&path)?;
            debug!(
                path = %path.display(),
                applications = config.applications.len(),
                "loaded config"
            );
            config
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            info!(path = %path.display(), "created default config");
            config
        };
        Ok(Self { path, config })
    }

    /// A store that is not yet backed by a file on disk.
    pub fn in_memory(path: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append an application and rewrite the full file.
    ///
    /// The in-memory list keeps the new entry even when writing fails, so the
    /// running dashboard stays consistent with what the user just added.
    pub fn append_application(&mut self, application: Application) -> Result<()> {
        self.config.applications.push(application);
        self.config.save_to(&self.path)
    }
}
