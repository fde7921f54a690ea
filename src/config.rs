//! Configuration for the switcher panel and the standalone app
//!
//! [`SwitcherConfig`] describes one project's panel. [`AppConfig`] is the
//! standalone app's remembered state, stored as JSON in the user's config
//! directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{settings, DEFAULT_SCENE_EXTENSION, REFRESH_INTERVAL};
use crate::error::{Result, SwitcherError};

const APP_DIR_NAME: &str = "SceneSwitcher";
const APP_CONFIG_FILE: &str = "config.json";

/// Settings for one open switcher panel
#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherConfig {
    /// Root directory of the project
    pub project_root: PathBuf,
    /// File holding the hidden scene identifiers
    pub hidden_scenes_file: PathBuf,
    /// Time between automatic rescans
    pub refresh_interval: Duration,
    /// Extension of scene documents
    pub scene_extension: String,
}

impl SwitcherConfig {
    /// Default configuration for the project at `root`
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        let project_root = root.into();
        let hidden_scenes_file = hidden_scenes_path(&project_root);
        Self {
            project_root,
            hidden_scenes_file,
            refresh_interval: REFRESH_INTERVAL,
            scene_extension: DEFAULT_SCENE_EXTENSION.to_string(),
        }
    }

    pub fn with_scene_extension(mut self, extension: &str) -> Self {
        self.scene_extension = extension.trim_start_matches('.').to_string();
        self
    }
}

/// Location of the hidden scene list inside a project
pub fn hidden_scenes_path(project_root: &Path) -> PathBuf {
    let [dir, sub] = settings::SETTINGS_DIR;
    project_root
        .join(dir)
        .join(sub)
        .join(settings::HIDDEN_SCENES_FILE)
}

/// Remembered state of the standalone app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project opened last time
    pub last_project: Option<PathBuf>,
    /// Extension of scene documents
    pub scene_extension: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_project: None,
            scene_extension: DEFAULT_SCENE_EXTENSION.to_string(),
        }
    }
}

impl AppConfig {
    /// Default location of the app config file
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| SwitcherError::Config("config directory unavailable".to_string()))?;
        Ok(base.join(APP_DIR_NAME).join(APP_CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load from `path`. Missing or corrupt files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring corrupt config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SwitcherError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SwitcherError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, json).map_err(|e| SwitcherError::io(path, e))
    }

    /// Pick the project to open: explicit argument, then the remembered
    /// project, then the current directory
    pub fn resolve_project(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.last_project.clone().filter(|p| p.is_dir()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Panel configuration for `project_root` using these settings
    pub fn switcher_config(&self, project_root: impl Into<PathBuf>) -> SwitcherConfig {
        SwitcherConfig::for_project(project_root).with_scene_extension(&self.scene_extension)
    }
}
