//! Scene list manager
//!
//! Owns the scene entries and the hidden set for the lifetime of an open
//! panel. The panel asks it for the rows to draw on every frame and hands
//! back the actions the user took.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{debug, error, info};

use crate::config::SwitcherConfig;
use crate::constants::text;
use crate::error::Result;
use crate::host::{is_project_owned, AssetIndex, SceneSession};
use crate::scenes::{sort_entries, HiddenSet, SceneEntry};

/// Which view the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// Click a scene to open it
    #[default]
    Launcher,
    /// Toggle which scenes the launcher shows
    Edit,
}

/// One line of the rendered list
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRow {
    /// Category heading, preceded by spacing unless it is the first
    Header { category: String, spacing_before: bool },
    /// Launcher button; disabled and marked when it is the active scene
    Launch { entry: SceneEntry, is_current: bool },
    /// Edit-mode visibility toggle
    Toggle { entry: SceneEntry, hidden: bool },
    /// Disabled informational button
    Notice(&'static str),
}

/// Something the user did in the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    SwitchTo(SceneEntry),
    SetHidden { guid: String, hidden: bool },
    ToggleEditMode,
}

/// Result of a scene switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The target scene is now active
    Opened,
    /// The user cancelled the save prompt; nothing changed
    Cancelled,
    /// Switching is unavailable during live execution
    Unavailable,
    /// The host refused to open the scene
    Failed,
}

/// State of an open scene switcher panel
pub struct SceneListManager {
    config: SwitcherConfig,
    entries: Vec<SceneEntry>,
    hidden: HiddenSet,
    mode: PanelMode,
    next_reload: Instant,
    last_reload: Option<DateTime<Local>>,
}

impl SceneListManager {
    /// Create a manager with no entries loaded yet
    pub fn new(config: SwitcherConfig) -> Self {
        let hidden = HiddenSet::empty(&config.hidden_scenes_file);
        Self {
            config,
            entries: Vec::new(),
            hidden,
            mode: PanelMode::Launcher,
            next_reload: Instant::now(),
            last_reload: None,
        }
    }

    /// Create a manager and load the scene list, as done when the panel opens
    pub fn open(config: SwitcherConfig, index: &dyn AssetIndex) -> Self {
        let mut manager = Self::new(config);
        manager.reload(index);
        manager
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    /// Entries in list order
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn hidden(&self) -> &HiddenSet {
        &self.hidden
    }

    pub fn is_hidden(&self, guid: &str) -> bool {
        self.hidden.contains(guid)
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    /// Local time of the last reload
    pub fn last_reload(&self) -> Option<DateTime<Local>> {
        self.last_reload
    }

    /// Rescan scenes and re-read the hidden set
    pub fn reload(&mut self, index: &dyn AssetIndex) {
        self.reload_at(index, Instant::now());
    }

    /// Reload as if the current time were `now`
    pub fn reload_at(&mut self, index: &dyn AssetIndex, now: Instant) {
        let mut entries: Vec<SceneEntry> = index
            .find_scene_guids()
            .into_iter()
            .filter_map(|guid| {
                let path = index.guid_to_path(&guid)?;
                if !is_project_owned(index.package_source(&path)) {
                    return None;
                }
                // Dangling entries are dropped silently
                let asset = index.load_scene(&path)?;
                Some(SceneEntry::new(guid, path, asset.name))
            })
            .collect();
        sort_entries(&mut entries);

        self.entries = entries;
        self.hidden = HiddenSet::load_or_create(&self.config.hidden_scenes_file);
        self.next_reload = now + self.config.refresh_interval;
        self.last_reload = Some(Local::now());

        debug!(
            "Reloaded {} scene(s), {} hidden",
            self.entries.len(),
            self.hidden.len()
        );
    }

    /// Reload if the refresh timer has expired. Returns true if it did.
    pub fn maybe_auto_reload(&mut self, index: &dyn AssetIndex) -> bool {
        self.maybe_auto_reload_at(index, Instant::now())
    }

    pub fn maybe_auto_reload_at(&mut self, index: &dyn AssetIndex, now: Instant) -> bool {
        if now > self.next_reload {
            self.reload_at(index, now);
            true
        } else {
            false
        }
    }

    /// Time left before the next automatic reload
    pub fn time_until_reload(&self, now: Instant) -> Duration {
        self.next_reload.saturating_duration_since(now)
    }

    /// Force launcher mode while authored content is running
    pub fn sync_play_state(&mut self, playing: bool) {
        if playing {
            self.mode = PanelMode::Launcher;
        }
    }

    /// Switch between launcher and edit mode. Ignored while playing.
    pub fn toggle_edit_mode(&mut self, playing: bool) -> bool {
        if playing {
            return false;
        }
        self.mode = match self.mode {
            PanelMode::Launcher => PanelMode::Edit,
            PanelMode::Edit => PanelMode::Launcher,
        };
        true
    }

    /// Hide or show a scene and persist the hidden set
    pub fn set_hidden(&mut self, guid: &str, hidden: bool) {
        if self.hidden.set_hidden(guid, hidden) {
            debug!("Scene {} is now {}", guid, if hidden { "hidden" } else { "visible" });
        }
        self.persist_or_log();
    }

    /// Write the hidden set to disk
    pub fn persist(&self) -> Result<()> {
        self.hidden.persist()
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            error!("Failed to save hidden scenes: {}", e);
        }
    }

    /// Open `entry` in the host, offering to save modified scenes first
    pub fn switch_scene(
        &mut self,
        session: &mut dyn SceneSession,
        entry: &SceneEntry,
    ) -> SwitchOutcome {
        if session.is_playing() {
            return SwitchOutcome::Unavailable;
        }
        if !session.save_modified_scenes_if_user_wants() {
            debug!("Switch to {} cancelled", entry.path);
            return SwitchOutcome::Cancelled;
        }
        if let Err(e) = session.open_scene(&entry.path) {
            error!("{}", e);
            return SwitchOutcome::Failed;
        }
        info!("Switched to scene {}", entry.path);
        // The hidden set is saved on every successful switch as well
        self.persist_or_log();
        SwitchOutcome::Opened
    }

    /// Apply an action collected during rendering. Returns the outcome when
    /// the action was a scene switch.
    pub fn apply(
        &mut self,
        action: PanelAction,
        session: &mut dyn SceneSession,
    ) -> Option<SwitchOutcome> {
        match action {
            PanelAction::SwitchTo(entry) => {
                let outcome = self.switch_scene(session, &entry);
                if outcome != SwitchOutcome::Opened {
                    debug!("Switch to {} ended as {:?}", entry.path, outcome);
                }
                Some(outcome)
            }
            PanelAction::SetHidden { guid, hidden } => {
                self.set_hidden(&guid, hidden);
                None
            }
            PanelAction::ToggleEditMode => {
                if !self.toggle_edit_mode(session.is_playing()) {
                    debug!("Edit mode is unavailable while playing");
                }
                None
            }
        }
    }

    /// Rows to draw for the current state
    pub fn rows(&self, playing: bool, active_scene: Option<&str>) -> Vec<PanelRow> {
        if playing {
            return vec![PanelRow::Notice(text::PLAY_MODE_NOTICE)];
        }

        let mut rows = Vec::new();
        let mut last_category: Option<&str> = None;

        for entry in &self.entries {
            let hidden = self.hidden.contains(&entry.guid);
            if self.mode == PanelMode::Launcher && hidden {
                continue;
            }

            if last_category != Some(entry.category.as_str()) {
                rows.push(PanelRow::Header {
                    category: entry.category.clone(),
                    spacing_before: last_category.is_some(),
                });
                last_category = Some(entry.category.as_str());
            }

            rows.push(match self.mode {
                PanelMode::Launcher => PanelRow::Launch {
                    entry: entry.clone(),
                    is_current: active_scene == Some(entry.path.as_str()),
                },
                PanelMode::Edit => PanelRow::Toggle {
                    entry: entry.clone(),
                    hidden,
                },
            });
        }

        if self.mode == PanelMode::Launcher && rows.is_empty() {
            rows.push(PanelRow::Notice(text::NO_SCENES));
        }

        rows
    }
}
